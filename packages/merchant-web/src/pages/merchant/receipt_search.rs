//! Find a receipt by reference, phone, or amount and date

use dioxus::prelude::*;
use merchant_core::receipts::{find_receipt, ReceiptQuery};

use crate::api::use_services;
use crate::routes::Route;
use crate::state::use_toasts;

const INPUT_CLASS: &str = "w-full px-4 py-3 border border-neutral-200 rounded-xl focus:outline-none focus:ring-2 focus:ring-emerald-500";

#[component]
pub fn ReceiptSearch() -> Element {
    let services = use_services();
    let toasts = use_toasts();
    let navigator = use_navigator();

    let mut query = use_signal(ReceiptQuery::default);
    let mut is_searching = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);

    let handle_submit = move |e: FormEvent| {
        e.prevent_default();
        if is_searching() {
            return;
        }
        let client = services.client();
        let current = query.read().clone();
        spawn(async move {
            is_searching.set(true);
            error.set(None);
            let result = find_receipt(client.as_ref(), &current).await;
            is_searching.set(false);

            match result {
                Ok(receipt_id) => {
                    navigator.push(Route::ReceiptView { receipt_id });
                }
                Err(e) => {
                    toasts.error(e.to_string());
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    let current = query.read().clone();

    rsx! {
        div {
            class: "max-w-2xl space-y-8",

            div {
                h1 { class: "text-3xl font-black tracking-tight text-neutral-900", "Search Receipt" }
                p { class: "text-neutral-500", "Look up a receipt by reference or customer phone, or by amount and date." }
            }

            form {
                class: "bg-white rounded-3xl shadow-xl border border-neutral-100 p-8 space-y-5",
                onsubmit: handle_submit,

                div {
                    label { class: "block text-sm font-bold text-neutral-700 mb-2", "Reference or phone number" }
                    input {
                        r#type: "text",
                        value: "{current.q}",
                        oninput: move |e: FormEvent| query.write().q = e.value(),
                        placeholder: "PRF-... or +234...",
                        class: INPUT_CLASS,
                        disabled: is_searching()
                    }
                }

                div {
                    class: "flex items-center gap-4 text-xs font-bold uppercase tracking-widest text-neutral-400",
                    div { class: "flex-1 h-px bg-neutral-200" }
                    "or"
                    div { class: "flex-1 h-px bg-neutral-200" }
                }

                div {
                    class: "grid grid-cols-1 sm:grid-cols-2 gap-4",
                    div {
                        label { class: "block text-sm font-bold text-neutral-700 mb-2", "Amount (\u{20A6})" }
                        input {
                            r#type: "number",
                            min: "0",
                            step: "0.01",
                            value: "{current.amount}",
                            oninput: move |e: FormEvent| query.write().amount = e.value(),
                            class: INPUT_CLASS,
                            disabled: is_searching()
                        }
                    }
                    div {
                        label { class: "block text-sm font-bold text-neutral-700 mb-2", "Date" }
                        input {
                            r#type: "date",
                            value: "{current.date}",
                            oninput: move |e: FormEvent| query.write().date = e.value(),
                            class: INPUT_CLASS,
                            disabled: is_searching()
                        }
                    }
                }

                if let Some(message) = error() {
                    div {
                        class: "p-3 bg-red-50 border border-red-200 rounded-xl text-red-800 text-sm",
                        "{message}"
                    }
                }

                button {
                    r#type: "submit",
                    class: "w-full bg-emerald-700 text-white py-3 px-4 rounded-xl font-bold hover:bg-emerald-800 disabled:opacity-50 disabled:cursor-not-allowed",
                    disabled: is_searching(),
                    if is_searching() { "Searching..." } else { "Search" }
                }
            }
        }
    }
}
