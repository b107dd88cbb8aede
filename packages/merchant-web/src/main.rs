//! Proof Platform - merchant dashboard
//!
//! Client-side Dioxus application over the Proof REST API.
//!
//! ## Running
//!
//! Development (with hot reload):
//! ```bash
//! PROOF_API_URL=http://localhost:3001/api dx serve --features web
//! ```
//!
//! Styles (Tailwind, in a second terminal):
//! ```bash
//! npx tailwindcss -i ./input.css -o ./assets/tailwind.css --watch
//! ```
//!
//! Production build:
//! ```bash
//! dx build --release --features web
//! ```

#![allow(non_snake_case)]

mod api;
mod app;
mod auth;
mod components;
mod pages;
mod routes;
mod state;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "merchant_web=debug,merchant_core=debug,proof_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    dioxus::launch(app::App);
}
