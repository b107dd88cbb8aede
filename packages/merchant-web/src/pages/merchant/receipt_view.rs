//! Single receipt with share and print

use dioxus::prelude::*;
use merchant_core::dashboard::BadgeVariant;
use merchant_core::format::{format_currency, format_date, format_phone_number, redact_phone};
use merchant_core::receipts::{load_receipt, share_link, status_heading};
use proof_client::{PaymentStatus, Receipt};
use tracing::warn;

use crate::api::use_services;
use crate::components::{LoadingSpinner, StatusBadge};
use crate::routes::Route;
use crate::state::use_toasts;

#[component]
pub fn ReceiptView(receipt_id: String) -> Element {
    let services = use_services();
    let toasts = use_toasts();
    let mut is_sharing = use_signal(|| false);

    let receipt = use_resource(use_reactive((&receipt_id,), {
        let services = services.clone();
        move |(receipt_id,)| {
            let client = services.client();
            async move { load_receipt(client.as_ref(), &receipt_id).await }
        }
    }));

    let share = {
        let receipt_id = receipt_id.clone();
        move |_| {
            if is_sharing() {
                return;
            }
            let client = services.client();
            let receipt_id = receipt_id.clone();
            spawn(async move {
                is_sharing.set(true);
                match share_link(client.as_ref(), &receipt_id).await {
                    Ok(url) => open_in_new_tab(&url),
                    Err(e) => toasts.error(e.to_string()),
                }
                is_sharing.set(false);
            });
        }
    };

    rsx! {
        div {
            class: "max-w-xl mx-auto space-y-6",

            Link {
                to: Route::ReceiptSearch {},
                class: "text-sm font-bold text-neutral-500 hover:text-neutral-900",
                "\u{2190} Back to search"
            }

            match &*receipt.read() {
                None => rsx! { LoadingSpinner { label: "Loading receipt..." } },
                Some(Err(e)) => rsx! {
                    div {
                        class: "bg-white rounded-3xl shadow-xl border border-neutral-100 p-8 text-center",
                        h1 { class: "text-2xl font-black text-neutral-900 mb-2", "{e}" }
                        p { class: "text-neutral-500", "Check the receipt number and try again." }
                    }
                },
                Some(Ok(data)) => rsx! {
                    ReceiptCard { receipt: data.clone() }
                    div {
                        class: "flex gap-3 print:hidden",
                        button {
                            class: "flex-1 bg-emerald-700 text-white py-3 px-4 rounded-xl font-bold hover:bg-emerald-800 disabled:opacity-50",
                            disabled: is_sharing(),
                            onclick: share,
                            if is_sharing() { "Preparing link..." } else { "Share on WhatsApp" }
                        }
                        button {
                            class: "flex-1 bg-white border border-neutral-200 py-3 px-4 rounded-xl font-bold text-neutral-700 hover:bg-neutral-100",
                            onclick: move |_| print_page(),
                            "Print"
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn ReceiptCard(receipt: Receipt) -> Element {
    let payment = &receipt.payment;
    let verified = payment.status == PaymentStatus::Success;
    let heading = status_heading(payment.status);
    let amount = format_currency(payment.amount);
    let date = payment.created_at.as_deref().map(format_date).unwrap_or_default();
    let merchant_phone = receipt.merchant.phone.as_deref().map(format_phone_number).unwrap_or_default();
    let purpose = payment.purpose.clone().unwrap_or_default().replace('_', " ");
    let customer_phone = payment.customer_phone.as_deref().map(redact_phone);
    let customer_name = payment.customer_name.clone();

    rsx! {
        div {
            class: "bg-white rounded-3xl shadow-xl border border-neutral-100 overflow-hidden",

            div {
                class: if verified { "p-8 text-center bg-emerald-700 text-white" } else { "p-8 text-center bg-neutral-800 text-white" },
                p { class: "text-xs font-bold uppercase tracking-widest opacity-80 mb-2", "{heading}" }
                p { class: "text-4xl font-black", "{amount}" }
                p { class: "mt-2 text-sm opacity-80", "{date}" }
            }

            dl {
                class: "divide-y divide-neutral-100 px-8",
                ReceiptLine { label: "Receipt", value: receipt.receipt_id.clone() }
                ReceiptLine { label: "Reference", value: payment.reference.clone() }
                ReceiptLine { label: "Merchant", value: receipt.merchant.name.clone() }
                if !merchant_phone.is_empty() {
                    ReceiptLine { label: "Merchant phone", value: merchant_phone }
                }
                if !purpose.is_empty() {
                    ReceiptLine { label: "Purpose", value: purpose }
                }
                if let Some(name) = customer_name {
                    ReceiptLine { label: "Customer", value: name }
                }
                if let Some(phone) = customer_phone {
                    ReceiptLine { label: "Customer phone", value: phone }
                }
                div {
                    class: "flex justify-between py-4",
                    dt { class: "text-sm text-neutral-500", "Status" }
                    dd {
                        StatusBadge {
                            variant: BadgeVariant::for_status(payment.status),
                            label: payment.status.as_str()
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ReceiptLine(label: &'static str, value: String) -> Element {
    rsx! {
        div {
            class: "flex justify-between gap-4 py-4",
            dt { class: "text-sm text-neutral-500", "{label}" }
            dd { class: "text-sm font-bold text-neutral-900 text-right", "{value}" }
        }
    }
}

#[cfg(feature = "web")]
fn open_in_new_tab(url: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.open_with_url_and_target(url, "_blank") {
        warn!("Could not open share link: {:?}", e);
    }
}

#[cfg(not(feature = "web"))]
fn open_in_new_tab(url: &str) {
    warn!(url, "No browser window to open the share link in");
}

#[cfg(feature = "web")]
fn print_page() {
    if let Some(Err(e)) = web_sys::window().map(|w| w.print()) {
        warn!("Print failed: {:?}", e);
    }
}

#[cfg(not(feature = "web"))]
fn print_page() {
    warn!("Printing needs a browser window");
}
