//! Fallback for unknown paths

use dioxus::prelude::*;

use crate::routes::Route;

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = format!("/{}", segments.join("/"));

    rsx! {
        div {
            class: "min-h-screen flex flex-col items-center justify-center bg-neutral-50 px-4 text-center",
            p { class: "text-7xl font-black text-emerald-700", "404" }
            h1 { class: "mt-4 text-2xl font-black text-neutral-900", "Oops! Lost in space?" }
            p { class: "mt-2 text-neutral-500", "Nothing lives at {path}." }
            Link {
                to: Route::Home {},
                class: "mt-6 inline-block bg-emerald-700 text-white px-5 py-2 rounded-xl font-bold hover:bg-emerald-800",
                "Back to Dashboard"
            }
        }
    }
}
