//! Where the merchant session survives page reloads

use std::sync::Arc;

use merchant_core::SessionStore;

/// Browser builds keep the session in local storage; anything else in memory.
pub fn session_store() -> Arc<dyn SessionStore> {
    #[cfg(feature = "web")]
    {
        Arc::new(LocalStorageSessionStore)
    }

    #[cfg(not(feature = "web"))]
    {
        Arc::new(merchant_core::MemorySessionStore::new())
    }
}

#[cfg(feature = "web")]
pub use local::LocalStorageSessionStore;

#[cfg(feature = "web")]
mod local {
    use anyhow::{anyhow, Context, Result};
    use merchant_core::session::{MERCHANT_KEY, TOKEN_KEY};
    use merchant_core::{AuthSession, SessionStore};

    /// `authToken` and `merchant` entries in `window.localStorage`
    pub struct LocalStorageSessionStore;

    fn storage() -> Result<web_sys::Storage> {
        web_sys::window()
            .context("No browser window")?
            .local_storage()
            .map_err(|e| anyhow!("Local storage blocked: {e:?}"))?
            .context("Local storage unavailable")
    }

    impl SessionStore for LocalStorageSessionStore {
        fn load(&self) -> Result<Option<AuthSession>> {
            let storage = storage()?;
            let token = storage
                .get_item(TOKEN_KEY)
                .map_err(|e| anyhow!("Failed to read {TOKEN_KEY}: {e:?}"))?;
            let merchant = storage
                .get_item(MERCHANT_KEY)
                .map_err(|e| anyhow!("Failed to read {MERCHANT_KEY}: {e:?}"))?;

            AuthSession::from_parts(token, merchant)
        }

        fn save(&self, session: &AuthSession) -> Result<()> {
            let storage = storage()?;
            storage
                .set_item(TOKEN_KEY, &session.token)
                .map_err(|e| anyhow!("Failed to write {TOKEN_KEY}: {e:?}"))?;
            storage
                .set_item(MERCHANT_KEY, &session.merchant_json()?)
                .map_err(|e| anyhow!("Failed to write {MERCHANT_KEY}: {e:?}"))?;
            Ok(())
        }

        fn clear(&self) -> Result<()> {
            let storage = storage()?;
            for key in [TOKEN_KEY, MERCHANT_KEY] {
                storage
                    .remove_item(key)
                    .map_err(|e| anyhow!("Failed to remove {key}: {e:?}"))?;
            }
            Ok(())
        }
    }
}
