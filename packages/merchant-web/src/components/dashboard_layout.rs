//! Merchant layout wrapper with auth protection

use dioxus::prelude::*;

use super::{PageLoader, Redirect, Sidebar};
use crate::auth::use_auth;
use crate::routes::Route;

/// Layout for every page behind login
#[component]
pub fn DashboardLayout() -> Element {
    let auth = use_auth();

    if *auth.loading.read() {
        return rsx! { PageLoader {} };
    }

    if !auth.is_authenticated() {
        return rsx! {
            Redirect { to: Route::Login {} }
        };
    }

    rsx! {
        div {
            class: "min-h-screen flex bg-neutral-50",
            Sidebar {}
            main {
                class: "flex-1 p-6 lg:p-10 overflow-x-hidden",
                Outlet::<Route> {}
            }
        }
    }
}

/// Layout for login and signup: logged-in merchants go straight home
#[component]
pub fn PublicOnlyLayout() -> Element {
    let auth = use_auth();

    if *auth.loading.read() {
        return rsx! { PageLoader {} };
    }

    if auth.is_authenticated() {
        return rsx! {
            Redirect { to: Route::Home {} }
        };
    }

    rsx! { Outlet::<Route> {} }
}
