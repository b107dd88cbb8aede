//! Merchant signup: phone, one-time code, optional business name, PIN

use std::rc::Rc;

use dioxus::prelude::*;
use merchant_core::signup::{OTP_LENGTH, PIN_LENGTH};
use merchant_core::{SignupFlow, SignupStep, Submission};

use crate::api::use_services;
use crate::routes::Route;
use crate::state::use_toasts;

#[derive(Clone, Copy, PartialEq)]
enum Action {
    RequestCode,
    VerifyCode,
    SubmitName,
    CreateAccount,
}

#[derive(Clone, Copy, PartialEq)]
enum Field {
    Phone,
    Otp,
    Name,
    Pin,
}

const INPUT_CLASS: &str = "w-full px-4 py-3 border border-neutral-200 rounded-xl focus:outline-none focus:ring-2 focus:ring-emerald-500";
const BUTTON_CLASS: &str = "w-full bg-emerald-700 text-white py-3 px-4 rounded-xl font-bold hover:bg-emerald-800 disabled:opacity-50 disabled:cursor-not-allowed";

#[component]
pub fn Signup() -> Element {
    let services = use_services();
    let toasts = use_toasts();
    let navigator = use_navigator();

    let flow = use_hook(|| {
        Rc::new(SignupFlow::new(
            services.public_client(),
            services.auth.clone(),
        ))
    });
    let mut session = use_signal(|| flow.snapshot());

    // Mirror the flow's state into the signal
    use_future({
        let flow = flow.clone();
        move || {
            let flow = flow.clone();
            async move {
                let mut changes = flow.subscribe();
                session.set(flow.snapshot());
                while changes.changed().await.is_ok() {
                    let current = changes.borrow_and_update().clone();
                    session.set(current);
                }
            }
        }
    });

    let edit = use_callback({
        let flow = flow.clone();
        move |(field, value): (Field, String)| match field {
            Field::Phone => flow.set_phone(&value),
            Field::Otp => flow.set_otp(&value),
            Field::Name => flow.set_name(&value),
            Field::Pin => flow.set_pin(&value),
        }
    });

    let run = use_callback({
        let flow = flow.clone();
        move |action: Action| {
            let flow = flow.clone();
            spawn(async move {
                let result = match action {
                    Action::RequestCode => flow.request_code().await,
                    Action::VerifyCode => flow.verify_code().await,
                    Action::SubmitName => flow.submit_name().await,
                    Action::CreateAccount => flow.create_account().await,
                };

                if let Submission::Settled(Some(notice)) = result {
                    toasts.show(notice);
                }
                if flow.snapshot().completed {
                    navigator.replace(Route::Home {});
                }
            });
        }
    });

    let change_phone = {
        let flow = flow.clone();
        move |_| {
            flow.change_phone();
        }
    };

    let current = session();
    let step = current.step;
    let loading = current.loading;
    let error = current.error.clone();
    let message = current.message.clone();

    rsx! {
        div {
            class: "min-h-screen bg-neutral-50 flex items-center justify-center px-4",

            div {
                class: "bg-white rounded-3xl shadow-xl p-8 max-w-md w-full",

                StepIndicator { step }

                div {
                    class: "mb-6 text-center",
                    h1 { class: "text-2xl font-black tracking-tight text-neutral-900 mb-2", "{step.title()}" }
                    p { class: "text-neutral-500 text-sm", "{step.subtitle()}" }
                }

                if let Some(message) = message {
                    div {
                        class: "mb-4 p-3 bg-emerald-50 border border-emerald-200 rounded-xl text-emerald-800 text-sm",
                        "{message}"
                    }
                }

                if let Some(error) = error {
                    div {
                        class: "mb-4 p-3 bg-red-50 border border-red-200 rounded-xl text-red-800 text-sm",
                        "{error}"
                    }
                }

                match step {
                    SignupStep::Phone => rsx! {
                        form {
                            onsubmit: move |e: FormEvent| {
                                e.prevent_default();
                                run.call(Action::RequestCode);
                            },
                            label { class: "block text-sm font-bold text-neutral-700 mb-2", "Phone Number" }
                            input {
                                r#type: "tel",
                                value: "{current.phone}",
                                oninput: move |e: FormEvent| edit.call((Field::Phone, e.value())),
                                placeholder: "+2348012345678",
                                class: INPUT_CLASS,
                                disabled: loading
                            }
                            button {
                                r#type: "submit",
                                class: "{BUTTON_CLASS} mt-6",
                                disabled: loading || current.phone.trim().is_empty(),
                                if loading { "Sending..." } else { "Send Code" }
                            }
                        }
                    },
                    SignupStep::Otp => rsx! {
                        form {
                            onsubmit: move |e: FormEvent| {
                                e.prevent_default();
                                run.call(Action::VerifyCode);
                            },
                            label { class: "block text-sm font-bold text-neutral-700 mb-2", "Verification Code" }
                            input {
                                r#type: "text",
                                inputmode: "numeric",
                                maxlength: "{OTP_LENGTH}",
                                value: "{current.otp}",
                                oninput: move |e: FormEvent| edit.call((Field::Otp, e.value())),
                                placeholder: "000000",
                                class: "{INPUT_CLASS} text-center tracking-[0.5em] text-xl",
                                disabled: loading
                            }
                            button {
                                r#type: "submit",
                                class: "{BUTTON_CLASS} mt-6",
                                disabled: loading || !current.otp_complete(),
                                if loading { "Verifying..." } else { "Verify" }
                            }
                        }
                    },
                    SignupStep::Name => rsx! {
                        form {
                            onsubmit: move |e: FormEvent| {
                                e.prevent_default();
                                run.call(Action::SubmitName);
                            },
                            label { class: "block text-sm font-bold text-neutral-700 mb-2", "Business Name" }
                            input {
                                r#type: "text",
                                value: "{current.name}",
                                oninput: move |e: FormEvent| edit.call((Field::Name, e.value())),
                                placeholder: "Acme Transport",
                                class: INPUT_CLASS,
                                disabled: loading
                            }
                            button {
                                r#type: "submit",
                                class: "{BUTTON_CLASS} mt-6",
                                disabled: loading,
                                if loading { "Saving..." } else { "Continue" }
                            }
                        }
                    },
                    SignupStep::Pin => rsx! {
                        form {
                            onsubmit: move |e: FormEvent| {
                                e.prevent_default();
                                run.call(Action::CreateAccount);
                            },
                            label { class: "block text-sm font-bold text-neutral-700 mb-2", "{PIN_LENGTH}-digit PIN" }
                            input {
                                r#type: "password",
                                inputmode: "numeric",
                                maxlength: "{PIN_LENGTH}",
                                value: "{current.pin}",
                                oninput: move |e: FormEvent| edit.call((Field::Pin, e.value())),
                                placeholder: "\u{2022}\u{2022}\u{2022}\u{2022}",
                                class: "{INPUT_CLASS} text-center tracking-[0.5em] text-xl",
                                disabled: loading
                            }
                            button {
                                r#type: "submit",
                                class: "{BUTTON_CLASS} mt-6",
                                disabled: loading || !current.pin_complete(),
                                if loading { "Creating account..." } else { "Create Account" }
                            }
                        }
                    },
                }

                if step != SignupStep::Phone {
                    button {
                        // Allowed mid-request; the late answer is dropped
                        r#type: "button",
                        class: "mt-4 w-full text-sm font-bold text-neutral-500 hover:text-neutral-900",
                        onclick: change_phone,
                        "Change phone number"
                    }
                }

                p {
                    class: "mt-6 text-center text-sm text-neutral-500",
                    "Already have an account? "
                    Link { to: Route::Login {}, class: "font-bold text-emerald-700 hover:underline", "Sign in" }
                }
            }
        }
    }
}

#[component]
fn StepIndicator(step: SignupStep) -> Element {
    let steps = [
        SignupStep::Phone,
        SignupStep::Otp,
        SignupStep::Name,
        SignupStep::Pin,
    ];
    let reached = steps.iter().position(|s| *s == step).unwrap_or(0);

    rsx! {
        div {
            class: "flex gap-2 mb-8",
            for (i, _) in steps.iter().enumerate() {
                div {
                    key: "{i}",
                    class: if i <= reached { "h-1.5 flex-1 rounded-full bg-emerald-600" } else { "h-1.5 flex-1 rounded-full bg-neutral-200" },
                }
            }
        }
    }
}
