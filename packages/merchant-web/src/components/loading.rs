//! Loading components

use dioxus::prelude::*;

/// Full-page loading spinner
#[component]
pub fn LoadingSpinner(#[props(default = "Loading...")] label: &'static str) -> Element {
    rsx! {
        div {
            class: "flex flex-col items-center justify-center",
            div {
                class: "flex space-x-2",
                div { class: "w-3 h-3 bg-emerald-500 rounded-full animate-bounce" }
                div { class: "w-3 h-3 bg-emerald-500 rounded-full animate-bounce", style: "animation-delay: 0.1s" }
                div { class: "w-3 h-3 bg-emerald-500 rounded-full animate-bounce", style: "animation-delay: 0.2s" }
            }
            p { class: "mt-4 text-sm text-neutral-500", "{label}" }
        }
    }
}

/// Spinner centered in the viewport
#[component]
pub fn PageLoader() -> Element {
    rsx! {
        div {
            class: "min-h-screen flex items-center justify-center bg-neutral-50",
            LoadingSpinner {}
        }
    }
}
