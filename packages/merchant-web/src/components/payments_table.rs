//! Transaction history table with sorting and pagination

use dioxus::prelude::*;
use merchant_core::dashboard::{receipt_link, BadgeVariant, PaymentsTable, SortDirection, SortKey};
use merchant_core::format::{format_currency, format_date};
use proof_client::Payment;

/// One table row, formatted for display
#[derive(Clone, PartialEq)]
struct Row {
    reference: String,
    date: String,
    purpose: String,
    amount: String,
    status: &'static str,
    badge: BadgeVariant,
    receipt: Option<String>,
}

impl From<&Payment> for Row {
    fn from(payment: &Payment) -> Self {
        Self {
            reference: payment.reference.clone(),
            date: payment.created_at.as_deref().map(format_date).unwrap_or_default(),
            purpose: payment.purpose.clone().unwrap_or_default().replace('_', " "),
            amount: format_currency(payment.amount),
            status: payment.status.as_str(),
            badge: BadgeVariant::for_status(payment.status),
            receipt: receipt_link(payment),
        }
    }
}

#[component]
pub fn PaymentsTableView(payments: Vec<Payment>) -> Element {
    let mut table = use_signal(|| PaymentsTable::new(payments.clone()));

    // New data from the parent resets sorting and paging
    use_effect(use_reactive((&payments,), move |(payments,)| {
        table.set(PaymentsTable::new(payments));
    }));

    let snapshot = table.read().clone();
    let rows: Vec<Row> = snapshot.visible_rows().into_iter().map(Row::from).collect();
    let page = snapshot.page() + 1;
    let page_count = snapshot.page_count();
    let can_previous = snapshot.can_previous();
    let can_next = snapshot.can_next();

    rsx! {
        div {
            class: "bg-white rounded-2xl shadow-xl border border-neutral-100 overflow-hidden",
            div {
                class: "px-6 py-4 border-b border-neutral-100",
                h2 { class: "text-lg font-black text-neutral-900", "Transaction History" }
            }

            if snapshot.is_empty() {
                p { class: "px-6 py-10 text-center text-sm text-neutral-500", "No payments yet today." }
            } else {
                table {
                    class: "w-full text-sm",
                    thead {
                        class: "bg-neutral-50 text-neutral-500 uppercase text-xs",
                        tr {
                            SortHeader { label: "Ref Number", sort_key: SortKey::Reference, table }
                            SortHeader { label: "Date", sort_key: SortKey::Date, table }
                            th { class: "px-6 py-3 text-left", "Purpose" }
                            SortHeader { label: "Amount", sort_key: SortKey::Amount, table }
                            SortHeader { label: "Status", sort_key: SortKey::Status, table }
                            th { class: "px-6 py-3 text-left" }
                        }
                    }
                    tbody {
                        for row in rows {
                            tr {
                                key: "{row.reference}",
                                class: "border-t border-neutral-100",
                                td { class: "px-6 py-3 font-mono text-xs", "{row.reference}" }
                                td { class: "px-6 py-3 text-neutral-500", "{row.date}" }
                                td { class: "px-6 py-3 capitalize", "{row.purpose}" }
                                td { class: "px-6 py-3 font-bold tabular-nums", "{row.amount}" }
                                td {
                                    class: "px-6 py-3",
                                    StatusBadge { variant: row.badge, label: row.status }
                                }
                                td {
                                    class: "px-6 py-3 text-right",
                                    if let Some(href) = row.receipt {
                                        a { class: "text-emerald-700 font-semibold hover:underline", href: "{href}", "Receipt" }
                                    }
                                }
                            }
                        }
                    }
                }

                // Pagination
                div {
                    class: "flex items-center justify-between px-6 py-3 border-t border-neutral-100 text-sm",
                    span { class: "text-neutral-500", "Page {page} of {page_count}" }
                    div {
                        class: "flex gap-1",
                        PageButton { label: "\u{00AB}", enabled: can_previous, onclick: move |_| table.write().first() }
                        PageButton { label: "\u{2039}", enabled: can_previous, onclick: move |_| table.write().previous() }
                        PageButton { label: "\u{203A}", enabled: can_next, onclick: move |_| table.write().next() }
                        PageButton { label: "\u{00BB}", enabled: can_next, onclick: move |_| table.write().last() }
                    }
                }
            }
        }
    }
}

#[component]
fn SortHeader(label: &'static str, sort_key: SortKey, table: Signal<PaymentsTable>) -> Element {
    let mut table = table;
    let arrow = match table.read().sort() {
        Some((key, SortDirection::Ascending)) if key == sort_key => " \u{2191}",
        Some((key, SortDirection::Descending)) if key == sort_key => " \u{2193}",
        _ => "",
    };

    rsx! {
        th {
            class: "px-6 py-3 text-left cursor-pointer select-none hover:text-neutral-900",
            onclick: move |_| table.write().toggle_sort(sort_key),
            "{label}{arrow}"
        }
    }
}

#[component]
pub fn StatusBadge(variant: BadgeVariant, label: &'static str) -> Element {
    let class = match variant {
        BadgeVariant::Success => "bg-green-50 text-green-700 border-green-200",
        BadgeVariant::Pending => "bg-amber-50 text-amber-700 border-amber-200",
        BadgeVariant::Failed => "bg-red-50 text-red-700 border-red-200",
        BadgeVariant::Default => "bg-neutral-50 text-neutral-600 border-neutral-200",
    };

    rsx! {
        span {
            class: "inline-block px-2 py-0.5 rounded border text-xs font-bold uppercase {class}",
            "{label}"
        }
    }
}

#[component]
fn PageButton(label: &'static str, enabled: bool, onclick: EventHandler<MouseEvent>) -> Element {
    rsx! {
        button {
            class: "px-3 py-1 rounded-lg border border-neutral-200 disabled:opacity-40 disabled:cursor-not-allowed hover:bg-neutral-100",
            disabled: !enabled,
            onclick: move |e| onclick.call(e),
            "{label}"
        }
    }
}
