//! API access for components
//!
//! [`Services`] is provided once at the root. Pages ask it for a client that
//! carries the current merchant's token, so a fresh login is picked up on the
//! next request.

use std::sync::Arc;

use dioxus::prelude::*;
use merchant_core::{AuthStore, Config, ProofClient};
use tracing::error;

#[derive(Clone)]
pub struct Services {
    pub config: Config,
    pub auth: Arc<AuthStore>,
}

impl Services {
    pub fn new(auth: Arc<AuthStore>) -> Self {
        Self {
            config: load_config(),
            auth,
        }
    }

    /// Client for public endpoints (signup, login, receipts)
    pub fn public_client(&self) -> Arc<ProofClient> {
        Arc::new(self.config.client())
    }

    /// Client carrying the logged-in merchant's bearer token
    pub fn client(&self) -> Arc<ProofClient> {
        let mut client = self.config.client();
        client.set_token(self.auth.token());
        Arc::new(client)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_config() -> Config {
    Config::from_env().unwrap_or_else(|e| {
        error!("Invalid configuration, using defaults: {:#}", e);
        Config::default()
    })
}

#[cfg(target_arch = "wasm32")]
fn load_config() -> Config {
    Config::from_build_env().unwrap_or_else(|e| {
        error!("Invalid configuration, using defaults: {:#}", e);
        Config::default()
    })
}

/// Hook to access the API services
pub fn use_services() -> Services {
    use_context::<Services>()
}
