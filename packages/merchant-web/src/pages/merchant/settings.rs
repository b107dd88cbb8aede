//! System settings. Preferences live in the page only; nothing is sent.

use dioxus::prelude::*;

use crate::state::{use_toasts, Language, NotificationChannel, Preferences};

#[component]
pub fn Settings() -> Element {
    let toasts = use_toasts();
    let mut preferences = use_signal(Preferences::default);

    let current = preferences();

    rsx! {
        div {
            class: "space-y-8 max-w-3xl",

            div {
                h1 { class: "text-3xl font-black tracking-tight text-neutral-900", "System Settings" }
                p { class: "text-neutral-500", "Notifications, language and appearance." }
            }

            div {
                class: "bg-white rounded-3xl shadow-xl border border-neutral-100 p-8 space-y-4",
                h2 { class: "text-lg font-black text-neutral-900", "Notifications" }

                for channel in NotificationChannel::variants().iter().copied() {
                    ToggleRow {
                        key: "{channel.label()}",
                        label: channel.label(),
                        description: channel.description(),
                        enabled: current.enabled(channel),
                        disabled: false,
                        on_toggle: move |_| preferences.write().toggle(channel),
                    }
                }
            }

            div {
                class: "bg-white rounded-3xl shadow-xl border border-neutral-100 p-8 space-y-4",
                h2 { class: "text-lg font-black text-neutral-900", "Language" }
                select {
                    class: "w-full px-4 py-3 border border-neutral-200 rounded-xl focus:outline-none focus:ring-2 focus:ring-emerald-500",
                    value: "{current.language.label()}",
                    onchange: move |e: FormEvent| {
                        let value = e.value();
                        if let Some(language) = Language::variants().iter().find(|l| l.label() == value) {
                            preferences.write().language = *language;
                        }
                    },
                    for language in Language::variants().iter().copied() {
                        option {
                            key: "{language.label()}",
                            value: "{language.label()}",
                            selected: language == current.language,
                            "{language.label()}"
                        }
                    }
                }
            }

            div {
                class: "bg-white rounded-3xl shadow-xl border border-neutral-100 p-8 space-y-4",
                h2 { class: "text-lg font-black text-neutral-900", "Appearance" }
                ToggleRow {
                    label: "Dark Theme",
                    description: "Coming soon.",
                    enabled: false,
                    disabled: true,
                    on_toggle: move |_| {},
                }
            }

            button {
                class: "bg-emerald-700 text-white py-3 px-6 rounded-xl font-bold hover:bg-emerald-800",
                onclick: move |_| toasts.success("Settings saved"),
                "Save Settings"
            }
        }
    }
}

#[component]
fn ToggleRow(
    label: &'static str,
    description: &'static str,
    enabled: bool,
    disabled: bool,
    on_toggle: EventHandler<()>,
) -> Element {
    let track = match (enabled, disabled) {
        (_, true) => "relative w-12 h-7 rounded-full bg-neutral-200 cursor-not-allowed",
        (true, false) => "relative w-12 h-7 rounded-full bg-emerald-600 transition-colors",
        (false, false) => "relative w-12 h-7 rounded-full bg-neutral-300 transition-colors",
    };
    let knob = if enabled {
        "absolute top-1 left-6 w-5 h-5 rounded-full bg-white shadow transition-all"
    } else {
        "absolute top-1 left-1 w-5 h-5 rounded-full bg-white shadow transition-all"
    };

    rsx! {
        div {
            class: "flex items-center justify-between gap-6 py-2",
            div {
                p { class: "font-bold text-neutral-900", "{label}" }
                p { class: "text-sm text-neutral-500", "{description}" }
            }
            button {
                r#type: "button",
                class: track,
                disabled,
                role: "switch",
                aria_checked: "{enabled}",
                onclick: move |_| on_toggle.call(()),
                span { class: knob }
            }
        }
    }
}
