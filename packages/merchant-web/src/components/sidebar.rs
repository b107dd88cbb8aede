//! Dashboard sidebar navigation

use dioxus::prelude::*;
use merchant_core::format::format_phone_number;

use crate::auth::use_auth;
use crate::routes::Route;
use crate::state::use_toasts;

/// Sidebar with page links and the merchant's logout button
#[component]
pub fn Sidebar() -> Element {
    let auth = use_auth();
    let toasts = use_toasts();
    let navigator = use_navigator();

    let merchant = auth.merchant();

    let handle_logout = {
        let auth = auth.clone();
        move |_| {
            auth.logout();
            toasts.success("Logged out");
            navigator.replace(Route::Login {});
        }
    };

    rsx! {
        aside {
            class: "w-64 shrink-0 bg-white border-r border-neutral-200 min-h-screen flex flex-col",

            // Brand
            div {
                class: "px-6 py-5 border-b border-neutral-100",
                Link {
                    to: Route::Home {},
                    class: "text-xl font-black tracking-tight text-emerald-700",
                    "Proof Platform"
                }
            }

            nav {
                class: "flex-1 px-3 py-4 space-y-1",
                NavLink { to: Route::Home {}, label: "Dashboard", icon: "\u{1F4CA}" }
                NavLink { to: Route::QrPayment {}, label: "Show QR Code", icon: "\u{1F4F1}" }
                NavLink { to: Route::ReceiptSearch {}, label: "Search Receipt", icon: "\u{1F50D}" }
                NavLink { to: Route::Profile {}, label: "Profile", icon: "\u{1F464}" }
                NavLink { to: Route::Settings {}, label: "System Settings", icon: "\u{2699}\u{FE0F}" }
            }

            // Merchant + logout
            div {
                class: "px-4 py-4 border-t border-neutral-100",
                if let Some(merchant) = merchant {
                    div {
                        class: "mb-3",
                        p { class: "text-sm font-bold text-neutral-900 truncate", "{merchant.name}" }
                        if let Some(phone) = merchant.phone.as_deref() {
                            p { class: "text-xs text-neutral-500", "{format_phone_number(phone)}" }
                        }
                    }
                }
                button {
                    class: "w-full text-sm text-neutral-600 hover:text-neutral-900 px-3 py-2 rounded-lg hover:bg-neutral-100 text-left",
                    onclick: handle_logout,
                    "Logout"
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct NavLinkProps {
    to: Route,
    label: &'static str,
    icon: &'static str,
}

#[component]
fn NavLink(props: NavLinkProps) -> Element {
    let route = use_route::<Route>();
    let is_active = route == props.to;

    rsx! {
        Link {
            to: props.to.clone(),
            class: if is_active {
                "flex items-center gap-3 px-3 py-2 rounded-lg text-sm font-semibold bg-emerald-50 text-emerald-800"
            } else {
                "flex items-center gap-3 px-3 py-2 rounded-lg text-sm font-medium text-neutral-600 hover:bg-neutral-100 hover:text-neutral-900"
            },
            span { "{props.icon}" }
            "{props.label}"
        }
    }
}
