//! Process-wide authentication context
//!
//! Screens ask [`AuthStore`] whether a merchant is logged in and subscribe to
//! it to re-render on login and logout. Persistence is injected through
//! [`SessionStore`] so the browser build can back it with local storage.

use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{info, warn};

use proof_client::Merchant;

/// Storage key for the bearer token
pub const TOKEN_KEY: &str = "authToken";
/// Storage key for the JSON-encoded merchant summary
pub const MERCHANT_KEY: &str = "merchant";

/// Bearer token plus the merchant it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub merchant: Merchant,
}

impl AuthSession {
    pub fn new(token: impl Into<String>, merchant: Merchant) -> Self {
        Self {
            token: token.into(),
            merchant,
        }
    }

    /// Rebuild a session from the two persisted values.
    ///
    /// A token without a merchant (or the reverse) is no session at all.
    pub fn from_parts(token: Option<String>, merchant_json: Option<String>) -> Result<Option<Self>> {
        let (Some(token), Some(merchant_json)) = (token, merchant_json) else {
            return Ok(None);
        };
        if token.is_empty() {
            return Ok(None);
        }

        let merchant: Merchant =
            serde_json::from_str(&merchant_json).context("Persisted merchant is not valid JSON")?;

        Ok(Some(Self { token, merchant }))
    }

    /// The merchant encoded for [`MERCHANT_KEY`]
    pub fn merchant_json(&self) -> Result<String> {
        serde_json::to_string(&self.merchant).context("Failed to encode merchant")
    }
}

/// Where the session survives page reloads
pub trait SessionStore {
    fn load(&self) -> Result<Option<AuthSession>>;

    fn save(&self, session: &AuthSession) -> Result<()>;

    fn clear(&self) -> Result<()>;
}

/// Session store that forgets everything when the process ends
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<AuthSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a session, as if persisted by an earlier visit
    pub fn with_session(session: AuthSession) -> Self {
        Self {
            session: Mutex::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<AuthSession>> {
        Ok(self
            .session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, session: &AuthSession) -> Result<()> {
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// The authentication context: `init` at startup, `set` on login, `clear` on logout.
pub struct AuthStore {
    store: Arc<dyn SessionStore>,
    state: watch::Sender<Option<AuthSession>>,
}

impl AuthStore {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        let (state, _) = watch::channel(None);
        Self { store, state }
    }

    /// Store backed by memory only
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::new()))
    }

    /// Restore the persisted session, if any.
    ///
    /// Unreadable persisted state is dropped rather than failing startup.
    pub fn init(&self) -> Option<AuthSession> {
        let session = match self.store.load() {
            Ok(session) => session,
            Err(e) => {
                warn!("Discarding unreadable persisted session: {:#}", e);
                if let Err(e) = self.store.clear() {
                    warn!("Failed to clear persisted session: {:#}", e);
                }
                None
            }
        };

        if session.is_some() {
            info!("Restored merchant session");
        }
        self.state.send_replace(session.clone());
        session
    }

    /// Log a merchant in. The session is published even if persisting it fails.
    pub fn set(&self, token: impl Into<String>, merchant: Merchant) {
        let session = AuthSession::new(token, merchant);
        if let Err(e) = self.store.save(&session) {
            warn!("Failed to persist session: {:#}", e);
        }
        info!("Merchant session started");
        self.state.send_replace(Some(session));
    }

    /// Log out
    pub fn clear(&self) {
        if let Err(e) = self.store.clear() {
            warn!("Failed to clear persisted session: {:#}", e);
        }
        info!("Merchant session cleared");
        self.state.send_replace(None);
    }

    pub fn current(&self) -> Option<AuthSession> {
        self.state.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().as_ref().map(|s| s.token.clone())
    }

    pub fn merchant(&self) -> Option<Merchant> {
        self.state.borrow().as_ref().map(|s| s.merchant.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_some()
    }

    /// Receiver that wakes on every login and logout
    pub fn subscribe(&self) -> watch::Receiver<Option<AuthSession>> {
        self.state.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl SessionStore for BrokenStore {
        fn load(&self) -> Result<Option<AuthSession>> {
            anyhow::bail!("corrupt")
        }

        fn save(&self, _session: &AuthSession) -> Result<()> {
            anyhow::bail!("quota exceeded")
        }

        fn clear(&self) -> Result<()> {
            Ok(())
        }
    }

    fn acme() -> AuthSession {
        AuthSession::new("t1", Merchant::named("Acme"))
    }

    #[test]
    fn init_restores_persisted_session() {
        let auth = AuthStore::new(Arc::new(MemorySessionStore::with_session(acme())));
        assert!(!auth.is_authenticated());

        assert_eq!(auth.init(), Some(acme()));
        assert!(auth.is_authenticated());
        assert_eq!(auth.token().as_deref(), Some("t1"));
        assert_eq!(auth.merchant().map(|m| m.name), Some("Acme".to_string()));
    }

    #[test]
    fn set_persists_and_clear_forgets() {
        let store = Arc::new(MemorySessionStore::new());
        let auth = AuthStore::new(store.clone());

        auth.set("t1", Merchant::named("Acme"));
        assert_eq!(store.load().unwrap(), Some(acme()));

        auth.clear();
        assert_eq!(store.load().unwrap(), None);
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn unreadable_store_is_not_fatal() {
        let auth = AuthStore::new(Arc::new(BrokenStore));
        assert_eq!(auth.init(), None);

        // Persisting fails but the in-memory session still applies
        auth.set("t1", Merchant::named("Acme"));
        assert_eq!(auth.current(), Some(acme()));
    }

    #[test]
    fn subscribers_see_login_and_logout() {
        let auth = AuthStore::in_memory();
        let mut rx = auth.subscribe();
        assert!(!rx.has_changed().unwrap());

        auth.set("t1", Merchant::named("Acme"));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().clone(), Some(acme()));

        auth.clear();
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), None);
    }

    #[test]
    fn from_parts_requires_both_values() {
        assert_eq!(AuthSession::from_parts(Some("t1".into()), None).unwrap(), None);
        assert_eq!(AuthSession::from_parts(None, Some("{}".into())).unwrap(), None);
        assert_eq!(
            AuthSession::from_parts(Some(String::new()), Some(r#"{"name":"Acme"}"#.into())).unwrap(),
            None
        );

        let session =
            AuthSession::from_parts(Some("t1".into()), Some(r#"{"name":"Acme"}"#.into())).unwrap();
        assert_eq!(session, Some(acme()));

        assert!(AuthSession::from_parts(Some("t1".into()), Some("not json".into())).is_err());
    }

    #[test]
    fn merchant_json_round_trips_through_from_parts() {
        let json = acme().merchant_json().unwrap();
        assert_eq!(
            AuthSession::from_parts(Some("t1".into()), Some(json)).unwrap(),
            Some(acme())
        );
    }
}
