//! Root application component

use dioxus::prelude::*;

use crate::auth::AuthProvider;
use crate::components::ToastHost;
use crate::routes::Route;
use crate::state::ToastState;

/// Root application component
#[component]
pub fn App() -> Element {
    use_context_provider(ToastState::new);

    rsx! {
        // Global styles
        document::Stylesheet { href: asset!("/assets/tailwind.css") }

        // Auth context provider wraps the entire app
        AuthProvider {
            Router::<Route> {}
            ToastHost {}
        }
    }
}
