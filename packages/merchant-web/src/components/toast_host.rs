//! Toast notifications

use dioxus::prelude::*;

use crate::state::use_toasts;

/// Renders active toasts in the top-right corner
#[component]
pub fn ToastHost() -> Element {
    let toasts = use_toasts();

    rsx! {
        div {
            class: "fixed top-4 right-4 z-50 flex flex-col gap-2 w-80",
            for toast in toasts.toasts.read().iter().cloned() {
                div {
                    key: "{toast.id}",
                    class: if toast.notice.is_error() {
                        "toast px-4 py-3 rounded-xl shadow-lg text-sm font-medium bg-red-50 border border-red-200 text-red-800"
                    } else {
                        "toast px-4 py-3 rounded-xl shadow-lg text-sm font-medium bg-emerald-50 border border-emerald-200 text-emerald-800"
                    },
                    onclick: move |_| toasts.dismiss(toast.id),
                    "{toast.notice.message()}"
                }
            }
        }
    }
}
