//! Merchant profile: business details, settlement accounts, verification

use std::rc::Rc;

use dioxus::prelude::*;
use merchant_core::format::format_phone_number;
use merchant_core::profile::{
    BankForm, BusinessForm, ProfileService, TierStatus, VerificationTier, BANKS,
    BUSINESS_CATEGORIES, SETTLEMENT_CYCLES,
};
use merchant_core::Submission;
use proof_client::{BankAccount, MerchantProfile};

use crate::api::use_services;
use crate::components::LoadingSpinner;
use crate::state::use_toasts;

const INPUT_CLASS: &str = "w-full px-4 py-3 border border-neutral-200 rounded-xl focus:outline-none focus:ring-2 focus:ring-emerald-500";
const BUTTON_CLASS: &str = "bg-emerald-700 text-white py-3 px-6 rounded-xl font-bold hover:bg-emerald-800 disabled:opacity-50 disabled:cursor-not-allowed";

#[component]
pub fn Profile() -> Element {
    let services = use_services();
    let toasts = use_toasts();

    let service = use_hook(|| Rc::new(ProfileService::new(services.client())));
    let mut business = use_signal(BusinessForm::default);
    let mut bank = use_signal(BankForm::default);
    let mut is_submitting = use_signal(|| false);

    let mut profile = use_resource({
        let service = service.clone();
        move || {
            let service = service.clone();
            async move { service.load().await }
        }
    });

    // Sync the business form whenever a profile arrives
    use_effect(move || match &*profile.read() {
        Some(Ok(loaded)) => business.set(BusinessForm::from_profile(loaded)),
        Some(Err(e)) => toasts.error(e.to_string()),
        None => {}
    });

    let save_business = {
        let service = service.clone();
        move |e: FormEvent| {
            e.prevent_default();
            let service = service.clone();
            let form = business.read().clone();
            spawn(async move {
                is_submitting.set(true);
                let result = service.update_business(&form).await;
                is_submitting.set(false);

                match result {
                    Submission::Settled(Some(notice)) => {
                        let saved = !notice.is_error();
                        toasts.show(notice);
                        if saved {
                            profile.restart();
                        }
                    }
                    Submission::Rejected(message) => toasts.error(message),
                    Submission::Busy | Submission::Settled(None) => {}
                }
            });
        }
    };

    let link_bank = {
        let service = service.clone();
        move |e: FormEvent| {
            e.prevent_default();
            let service = service.clone();
            let form = bank.read().clone();
            spawn(async move {
                is_submitting.set(true);
                let result = service.link_bank(&form).await;
                is_submitting.set(false);

                match result {
                    Submission::Settled(Some(notice)) => {
                        let linked = !notice.is_error();
                        toasts.show(notice);
                        if linked {
                            bank.set(BankForm::default());
                            profile.restart();
                        }
                    }
                    Submission::Rejected(message) => toasts.error(message),
                    Submission::Busy | Submission::Settled(None) => {}
                }
            });
        }
    };

    let loaded = match &*profile.read() {
        Some(Ok(p)) => Some(p.clone()),
        _ => None,
    };
    let Some(loaded) = loaded else {
        return rsx! {
            if profile.read().is_none() {
                LoadingSpinner { label: "Loading profile..." }
            } else {
                div {
                    class: "p-6 bg-red-50 border border-red-200 rounded-2xl text-red-800",
                    p { class: "font-bold mb-3", "Could not load profile data" }
                    button {
                        class: "px-4 py-2 bg-white border border-red-200 rounded-xl text-sm font-bold hover:bg-red-100",
                        onclick: move |_| profile.restart(),
                        "Try again"
                    }
                }
            }
        };
    };

    let business_form = business.read().clone();
    let bank_form = bank.read().clone();
    let busy = is_submitting();

    rsx! {
        div {
            class: "space-y-8 max-w-4xl",

            ProfileHeader { profile: loaded.clone() }

            // Business details
            form {
                class: "bg-white rounded-3xl shadow-xl border border-neutral-100 p-8 space-y-5",
                onsubmit: save_business,

                h2 { class: "text-lg font-black text-neutral-900", "Business Details" }

                div {
                    class: "grid grid-cols-1 md:grid-cols-2 gap-4",
                    div {
                        label { class: "block text-sm font-bold text-neutral-700 mb-2", "Business Category" }
                        select {
                            class: INPUT_CLASS,
                            value: "{business_form.category}",
                            onchange: move |e: FormEvent| business.write().category = e.value(),
                            for category in BUSINESS_CATEGORIES {
                                option {
                                    key: "{category}",
                                    value: "{category}",
                                    selected: business_form.category == category,
                                    "{category}"
                                }
                            }
                        }
                    }
                    div {
                        label { class: "block text-sm font-bold text-neutral-700 mb-2", "CAC Number" }
                        input {
                            r#type: "text",
                            value: "{business_form.cac_number}",
                            oninput: move |e: FormEvent| business.write().cac_number = e.value(),
                            placeholder: "RC123456",
                            class: INPUT_CLASS
                        }
                    }
                    div {
                        label { class: "block text-sm font-bold text-neutral-700 mb-2", "Business Address" }
                        input {
                            r#type: "text",
                            value: "{business_form.address}",
                            oninput: move |e: FormEvent| business.write().address = e.value(),
                            class: INPUT_CLASS
                        }
                    }
                    div {
                        label { class: "block text-sm font-bold text-neutral-700 mb-2", "BVN" }
                        input {
                            r#type: "text",
                            inputmode: "numeric",
                            maxlength: "11",
                            value: "{business_form.bvn}",
                            oninput: move |e: FormEvent| business.write().bvn = e.value(),
                            class: INPUT_CLASS
                        }
                    }
                }

                button {
                    r#type: "submit",
                    class: BUTTON_CLASS,
                    disabled: busy,
                    if busy { "Saving..." } else { "Save Changes" }
                }
            }

            // Settlement accounts
            div {
                class: "bg-white rounded-3xl shadow-xl border border-neutral-100 p-8 space-y-6",

                h2 { class: "text-lg font-black text-neutral-900", "Settlement Accounts" }

                if loaded.banks.is_empty() {
                    p { class: "text-sm text-neutral-500", "No bank account linked yet." }
                } else {
                    div {
                        class: "space-y-3",
                        for (i, account) in loaded.banks.iter().enumerate() {
                            BankRow { key: "{i}", account: account.clone() }
                        }
                    }
                }

                form {
                    class: "border-t border-neutral-100 pt-6 space-y-4",
                    onsubmit: link_bank,

                    h3 { class: "text-sm font-black uppercase tracking-widest text-neutral-500", "Link a new account" }

                    div {
                        class: "grid grid-cols-1 md:grid-cols-2 gap-4",
                        select {
                            class: INPUT_CLASS,
                            value: "{bank_form.bank_name}",
                            onchange: move |e: FormEvent| bank.write().bank_name = e.value(),
                            option { value: "", selected: bank_form.bank_name.is_empty(), "Select bank" }
                            for name in BANKS {
                                option {
                                    key: "{name}",
                                    value: "{name}",
                                    selected: bank_form.bank_name == name,
                                    "{name}"
                                }
                            }
                        }
                        input {
                            r#type: "text",
                            inputmode: "numeric",
                            maxlength: "10",
                            value: "{bank_form.account_number}",
                            oninput: move |e: FormEvent| bank.write().account_number = e.value(),
                            placeholder: "Account number",
                            class: INPUT_CLASS
                        }
                        input {
                            r#type: "text",
                            value: "{bank_form.account_name}",
                            oninput: move |e: FormEvent| bank.write().account_name = e.value(),
                            placeholder: "Account name",
                            class: INPUT_CLASS
                        }
                        select {
                            class: INPUT_CLASS,
                            value: "{bank_form.settlement_cycle}",
                            onchange: move |e: FormEvent| bank.write().settlement_cycle = e.value(),
                            for cycle in SETTLEMENT_CYCLES {
                                option {
                                    key: "{cycle}",
                                    value: "{cycle}",
                                    selected: bank_form.settlement_cycle == cycle,
                                    "{cycle}"
                                }
                            }
                        }
                    }

                    button {
                        r#type: "submit",
                        class: BUTTON_CLASS,
                        disabled: busy,
                        if busy { "Linking..." } else { "Link Account" }
                    }
                }
            }

            VerificationTiers { level: loaded.verification_level.clone() }
        }
    }
}

#[component]
fn ProfileHeader(profile: MerchantProfile) -> Element {
    let name = profile.name.clone().unwrap_or_else(|| "Merchant".to_string());
    let phone = profile.phone.as_deref().map(format_phone_number).unwrap_or_default();
    let initial = name.chars().next().unwrap_or('M').to_uppercase().to_string();

    rsx! {
        div {
            class: "flex items-center gap-5",
            div {
                class: "w-16 h-16 rounded-2xl bg-emerald-700 text-white flex items-center justify-center text-2xl font-black",
                "{initial}"
            }
            div {
                h1 { class: "text-3xl font-black tracking-tight text-neutral-900", "{name}" }
                p { class: "text-neutral-500", "{phone}" }
            }
        }
    }
}

#[component]
fn BankRow(account: BankAccount) -> Element {
    rsx! {
        div {
            class: "flex items-center justify-between p-4 border border-neutral-100 rounded-2xl",
            div {
                p { class: "font-bold text-neutral-900", "{account.bank_name}" }
                p { class: "text-sm text-neutral-500", "{account.account_number} \u{00B7} {account.account_name}" }
            }
            span {
                class: "text-xs font-bold uppercase tracking-widest text-neutral-500",
                "{account.settlement_cycle}"
            }
        }
    }
}

#[component]
fn VerificationTiers(level: Option<String>) -> Element {
    let tiers: Vec<(VerificationTier, TierStatus, bool)> = VerificationTier::ALL
        .into_iter()
        .map(|tier| {
            (
                tier,
                tier.status(level.as_deref()),
                tier.is_current(level.as_deref()),
            )
        })
        .collect();

    rsx! {
        div {
            class: "bg-white rounded-3xl shadow-xl border border-neutral-100 p-8 space-y-4",
            h2 { class: "text-lg font-black text-neutral-900", "Verification" }

            for (tier, status, current) in tiers {
                div {
                    key: "{tier.label()}",
                    class: if current { "flex items-start justify-between gap-4 p-4 rounded-2xl border-2 border-emerald-600" } else { "flex items-start justify-between gap-4 p-4 rounded-2xl border border-neutral-100" },
                    div {
                        p { class: "font-bold text-neutral-900", "{tier.label()}" }
                        p { class: "text-sm text-neutral-500", "{tier.description()}" }
                    }
                    span {
                        class: match status {
                            TierStatus::Verified => "px-3 py-1 rounded-full text-xs font-bold bg-emerald-100 text-emerald-800",
                            TierStatus::Pending => "px-3 py-1 rounded-full text-xs font-bold bg-amber-100 text-amber-800",
                            TierStatus::Locked => "px-3 py-1 rounded-full text-xs font-bold bg-neutral-100 text-neutral-500",
                        },
                        "{status.label()}"
                    }
                }
            }
        }
    }
}
