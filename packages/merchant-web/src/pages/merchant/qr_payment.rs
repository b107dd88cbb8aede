//! Collect a payment: show the merchant QR code or enter one manually

use std::rc::Rc;

use dioxus::prelude::*;
use merchant_core::collection::{Collection, Collector, ManualPayment, PaymentPurpose, PAYMENT_SUCCESSFUL};

use crate::api::use_services;
use crate::components::LoadingSpinner;
use crate::routes::Route;
use crate::state::use_toasts;

const INPUT_CLASS: &str = "w-full px-4 py-3 border border-neutral-200 rounded-xl focus:outline-none focus:ring-2 focus:ring-emerald-500";

#[component]
pub fn QrPayment() -> Element {
    let services = use_services();
    let toasts = use_toasts();
    let navigator = use_navigator();

    let collector = use_hook(|| Rc::new(Collector::new(services.client())));
    let mut form = use_signal(ManualPayment::default);
    let mut is_pending = use_signal(|| false);

    let qr = use_resource({
        let collector = collector.clone();
        move || {
            let collector = collector.clone();
            async move { collector.load_qr().await }
        }
    });

    let handle_submit = {
        let collector = collector.clone();
        move |e: FormEvent| {
            e.prevent_default();
            let collector = collector.clone();
            let manual = form.read().clone();
            spawn(async move {
                is_pending.set(true);
                let result = collector.collect(&manual).await;
                is_pending.set(false);

                match result {
                    Collection::Received { receipt_id } => {
                        toasts.success(PAYMENT_SUCCESSFUL);
                        form.set(ManualPayment::default());
                        navigator.push(Route::ReceiptView { receipt_id });
                    }
                    Collection::Rejected(message) | Collection::Failed(message) => {
                        toasts.error(message)
                    }
                    Collection::Busy => {}
                }
            });
        }
    };

    let current = form.read().clone();
    let selected = current.purpose;

    rsx! {
        div {
            class: "space-y-8",

            div {
                h1 { class: "text-3xl font-black tracking-tight text-neutral-900", "Collect Payment" }
                p { class: "text-neutral-500", "Let customers scan your code, or record a payment by hand." }
            }

            div {
                class: "grid grid-cols-1 lg:grid-cols-2 gap-8",

                // QR code
                div {
                    class: "bg-white rounded-3xl shadow-xl border border-neutral-100 p-8 flex flex-col items-center",
                    h2 { class: "text-lg font-black text-neutral-900 mb-6", "Your Payment QR Code" }
                    match &*qr.read() {
                        None => rsx! { LoadingSpinner { label: "Loading QR code..." } },
                        Some(Err(e)) => rsx! {
                            p { class: "text-red-700 font-bold", "{e}" }
                        },
                        Some(Ok(src)) => rsx! {
                            img {
                                src: "{src}",
                                alt: "Merchant payment QR code",
                                class: "w-64 h-64 rounded-2xl border border-neutral-100"
                            }
                            p { class: "mt-4 text-sm text-neutral-500 text-center", "Customers scan this code to pay you directly." }
                        },
                    }
                }

                // Manual entry
                form {
                    class: "bg-white rounded-3xl shadow-xl border border-neutral-100 p-8 space-y-5",
                    onsubmit: handle_submit,

                    h2 { class: "text-lg font-black text-neutral-900", "Manual Payment" }

                    div {
                        label { class: "block text-sm font-bold text-neutral-700 mb-2", "Amount (\u{20A6})" }
                        input {
                            r#type: "number",
                            min: "0",
                            step: "0.01",
                            value: "{current.amount}",
                            oninput: move |e: FormEvent| form.write().amount = e.value(),
                            placeholder: "0.00",
                            class: INPUT_CLASS,
                            disabled: is_pending()
                        }
                    }

                    div {
                        label { class: "block text-sm font-bold text-neutral-700 mb-2", "Purpose" }
                        select {
                            class: INPUT_CLASS,
                            value: "{selected.value()}",
                            onchange: move |e: FormEvent| {
                                if let Some(purpose) = PaymentPurpose::from_value(&e.value()) {
                                    form.write().purpose = purpose;
                                }
                            },
                            disabled: is_pending(),
                            for purpose in PaymentPurpose::ALL {
                                option {
                                    key: "{purpose.value()}",
                                    value: "{purpose.value()}",
                                    selected: purpose == selected,
                                    "{purpose.icon()} {purpose.label()}"
                                }
                            }
                        }
                    }

                    div {
                        label { class: "block text-sm font-bold text-neutral-700 mb-2", "Customer Phone (optional)" }
                        input {
                            r#type: "tel",
                            value: "{current.customer_phone}",
                            oninput: move |e: FormEvent| form.write().customer_phone = e.value(),
                            placeholder: "+2348012345678",
                            class: INPUT_CLASS,
                            disabled: is_pending()
                        }
                    }

                    div {
                        label { class: "block text-sm font-bold text-neutral-700 mb-2", "Customer Name (optional)" }
                        input {
                            r#type: "text",
                            value: "{current.customer_name}",
                            oninput: move |e: FormEvent| form.write().customer_name = e.value(),
                            class: INPUT_CLASS,
                            disabled: is_pending()
                        }
                    }

                    button {
                        r#type: "submit",
                        class: "w-full bg-emerald-700 text-white py-3 px-4 rounded-xl font-bold hover:bg-emerald-800 disabled:opacity-50 disabled:cursor-not-allowed",
                        disabled: is_pending() || current.amount.trim().is_empty(),
                        if is_pending() { "Processing..." } else { "Record Payment" }
                    }
                }
            }
        }
    }
}
