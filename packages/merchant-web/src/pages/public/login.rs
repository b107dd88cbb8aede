//! Merchant login page

use std::rc::Rc;

use dioxus::prelude::*;
use merchant_core::login::LoginForm;
use merchant_core::Submission;

use crate::api::use_services;
use crate::routes::Route;
use crate::state::use_toasts;

/// Phone + PIN login
#[component]
pub fn Login() -> Element {
    let services = use_services();
    let toasts = use_toasts();
    let navigator = use_navigator();

    let form = use_hook(|| {
        Rc::new(LoginForm::new(
            services.public_client(),
            services.auth.clone(),
        ))
    });
    let mut phone = use_signal(String::new);
    let mut pin = use_signal(String::new);
    let mut is_pending = use_signal(|| false);

    let edit_phone = {
        let form = form.clone();
        move |e: FormEvent| {
            form.set_phone(&e.value());
            phone.set(form.fields().phone);
        }
    };

    let edit_pin = {
        let form = form.clone();
        move |e: FormEvent| {
            form.set_pin(&e.value());
            pin.set(form.fields().pin);
        }
    };

    let handle_submit = {
        let form = form.clone();
        move |e: FormEvent| {
            e.prevent_default();
            let form = form.clone();
            spawn(async move {
                is_pending.set(true);
                let result = form.submit().await;
                is_pending.set(false);

                match result {
                    Submission::Settled(Some(notice)) => {
                        let logged_in = !notice.is_error();
                        toasts.show(notice);
                        if logged_in {
                            navigator.replace(Route::Home {});
                        }
                    }
                    Submission::Rejected(message) => toasts.error(message),
                    Submission::Busy | Submission::Settled(None) => {}
                }
            });
        }
    };

    let can_submit = !is_pending() && pin().len() == 4 && !phone().trim().is_empty();

    rsx! {
        div {
            class: "min-h-screen bg-neutral-50 flex items-center justify-center px-4",

            div {
                class: "bg-white rounded-3xl shadow-xl p-8 max-w-md w-full",

                div {
                    class: "mb-8 text-center",
                    h1 { class: "text-3xl font-black tracking-tight text-neutral-900 mb-2", "Proof Platform" }
                    p { class: "text-neutral-500 text-sm", "Sign in to your merchant dashboard" }
                }

                form {
                    onsubmit: handle_submit,
                    div {
                        class: "mb-4",
                        label { class: "block text-sm font-bold text-neutral-700 mb-2", "Phone Number" }
                        input {
                            r#type: "tel",
                            value: "{phone}",
                            oninput: edit_phone,
                            placeholder: "+2348012345678",
                            class: "w-full px-4 py-3 border border-neutral-200 rounded-xl focus:outline-none focus:ring-2 focus:ring-emerald-500",
                            disabled: is_pending()
                        }
                    }
                    div {
                        class: "mb-6",
                        label { class: "block text-sm font-bold text-neutral-700 mb-2", "PIN" }
                        input {
                            r#type: "password",
                            inputmode: "numeric",
                            maxlength: "4",
                            value: "{pin}",
                            oninput: edit_pin,
                            placeholder: "\u{2022}\u{2022}\u{2022}\u{2022}",
                            class: "w-full px-4 py-3 border border-neutral-200 rounded-xl tracking-[0.5em] focus:outline-none focus:ring-2 focus:ring-emerald-500",
                            disabled: is_pending()
                        }
                    }
                    button {
                        r#type: "submit",
                        class: "w-full bg-emerald-700 text-white py-3 px-4 rounded-xl font-bold hover:bg-emerald-800 disabled:opacity-50 disabled:cursor-not-allowed",
                        disabled: !can_submit,
                        if is_pending() { "Signing in..." } else { "Sign In" }
                    }
                }

                p {
                    class: "mt-6 text-center text-sm text-neutral-500",
                    "Don't have an account? "
                    Link { to: Route::Signup {}, class: "font-bold text-emerald-700 hover:underline", "Create one" }
                }
            }
        }
    }
}
