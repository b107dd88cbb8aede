//! Merchant home page

use dioxus::prelude::*;
use merchant_core::dashboard::load_dashboard;

use crate::api::use_services;
use crate::auth::use_auth;
use crate::components::{LoadingSpinner, PaymentsTableView, SectionCards};
use crate::routes::Route;
use crate::state::use_toasts;

/// Today's summary and the recent payments
#[component]
pub fn Home() -> Element {
    let services = use_services();
    let auth = use_auth();
    let toasts = use_toasts();

    let mut dashboard = use_resource(move || {
        let client = services.client();
        async move { load_dashboard(client.as_ref()).await }
    });

    use_effect(move || {
        if let Some(Err(e)) = &*dashboard.read() {
            toasts.error(e.to_string());
        }
    });

    let greeting = auth
        .merchant()
        .map(|m| format!("Welcome back, {}", m.name))
        .unwrap_or_else(|| "Welcome back".to_string());

    rsx! {
        div {
            class: "space-y-8",

            div {
                class: "flex flex-wrap items-end justify-between gap-4",
                div {
                    h1 { class: "text-3xl font-black tracking-tight text-neutral-900", "{greeting}" }
                    p { class: "text-neutral-500", "Here is what happened with your payments today." }
                }
                div {
                    class: "flex gap-3",
                    QuickActionLink { to: Route::QrPayment {}, label: "Collect Payment", icon: "\u{1F4F1}" }
                    QuickActionLink { to: Route::ReceiptSearch {}, label: "Find Receipt", icon: "\u{1F50D}" }
                }
            }

            match &*dashboard.read() {
                None => rsx! { LoadingSpinner { label: "Loading dashboard..." } },
                Some(Err(e)) => rsx! {
                    div {
                        class: "p-6 bg-red-50 border border-red-200 rounded-2xl text-red-800",
                        p { class: "font-bold mb-3", "{e}" }
                        button {
                            class: "px-4 py-2 bg-white border border-red-200 rounded-xl text-sm font-bold hover:bg-red-100",
                            onclick: move |_| dashboard.restart(),
                            "Try again"
                        }
                    }
                },
                Some(Ok(data)) => rsx! {
                    SectionCards { summary: data.summary.clone() }
                    PaymentsTableView { payments: data.payments.clone() }
                },
            }
        }
    }
}

#[component]
fn QuickActionLink(to: Route, label: &'static str, icon: &'static str) -> Element {
    rsx! {
        Link {
            to,
            class: "inline-flex items-center gap-2 px-4 py-2 bg-white border border-neutral-200 rounded-xl text-sm font-bold text-neutral-700 hover:bg-neutral-100 transition-colors",
            span { "{icon}" }
            span { "{label}" }
        }
    }
}
