//! Summary cards on the merchant home page

use dioxus::prelude::*;
use merchant_core::dashboard::settlement_label;
use merchant_core::format::format_currency;
use proof_client::DailySummary;

#[component]
pub fn SectionCards(summary: DailySummary) -> Element {
    let pending = summary.pending_payments > 0;
    let net = format_currency(summary.net_amount);
    let label = settlement_label(&summary);

    rsx! {
        div {
            class: "grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-6",

            // Net
            div {
                class: "bg-neutral-900 rounded-2xl shadow-2xl p-6",
                p { class: "text-neutral-400 font-bold uppercase tracking-widest text-xs", "Today's Take-Home" }
                p { class: "text-4xl font-black text-white tabular-nums tracking-tighter mt-1", "{net}" }
                span { class: "inline-block mt-4 px-2 py-1 rounded bg-emerald-600 text-white text-xs font-bold", "NET RECEIVABLE" }
            }

            // Gross
            StatCard {
                title: "Total Collected",
                value: format_currency(summary.total_collected),
                footer: format!("{} PAYMENTS \u{00B7} GROSS", summary.successful_payments),
            }

            // Settlement
            div {
                class: "bg-white border border-neutral-100 rounded-2xl shadow-xl p-6",
                p { class: "text-neutral-500 font-bold uppercase tracking-widest text-xs", "Settled vs Pending" }
                div {
                    class: "flex items-baseline gap-2 mt-1",
                    span { class: "text-3xl font-black text-neutral-900 tabular-nums", "{summary.successful_payments}" }
                    span { class: "text-neutral-300 font-black text-xl", "/" }
                    span { class: "text-xl font-bold text-neutral-400", "{summary.pending_payments}" }
                }
                span {
                    class: if pending {
                        "inline-block mt-4 px-2 py-1 rounded border text-xs font-bold bg-amber-50 text-amber-700 border-amber-200"
                    } else {
                        "inline-block mt-4 px-2 py-1 rounded border text-xs font-bold bg-green-50 text-green-700 border-green-200"
                    },
                    "{label}"
                }
            }

            // Fees
            StatCard {
                title: "System Fees",
                value: format_currency(summary.fees),
                footer: "1.5% FLAT RATE APPLIED".to_string(),
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct StatCardProps {
    title: &'static str,
    value: String,
    footer: String,
}

#[component]
fn StatCard(props: StatCardProps) -> Element {
    rsx! {
        div {
            class: "bg-white border border-neutral-100 rounded-2xl shadow-xl p-6",
            p { class: "text-neutral-500 font-bold uppercase tracking-widest text-xs", "{props.title}" }
            p { class: "text-3xl font-black text-neutral-900 tabular-nums tracking-tighter mt-1", "{props.value}" }
            p { class: "mt-4 text-xs font-bold text-neutral-400 uppercase", "{props.footer}" }
        }
    }
}
