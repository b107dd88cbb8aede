//! Authentication context provider

use std::sync::Arc;

use dioxus::prelude::*;
use merchant_core::{AuthSession, AuthStore, Merchant};

use super::session_store;
use crate::api::Services;

/// Authentication context that provides merchant state to the entire app.
///
/// The signals mirror [`AuthStore`]; login and logout go through the store and
/// the provider's subscription copies the change into the signals.
#[derive(Clone)]
pub struct AuthContext {
    /// Current merchant session (if any)
    pub session: Signal<Option<AuthSession>>,
    /// Whether the persisted session is still being restored
    pub loading: Signal<bool>,
    store: Arc<AuthStore>,
}

impl AuthContext {
    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_some()
    }

    pub fn merchant(&self) -> Option<Merchant> {
        self.session.read().as_ref().map(|s| s.merchant.clone())
    }

    pub fn store(&self) -> Arc<AuthStore> {
        self.store.clone()
    }

    /// Log out
    pub fn logout(&self) {
        self.store.clear();
    }
}

/// Auth provider component that wraps the app
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let store = use_hook(|| Arc::new(AuthStore::new(session_store())));
    let mut session = use_signal(|| None::<AuthSession>);
    let mut loading = use_signal(|| true);

    use_context_provider(|| Services::new(store.clone()));
    use_context_provider(|| AuthContext {
        session,
        loading,
        store: store.clone(),
    });

    // Restore the persisted session, then follow logins and logouts
    use_future(move || {
        let store = store.clone();
        async move {
            let mut changes = store.subscribe();
            session.set(store.init());
            loading.set(false);

            while changes.changed().await.is_ok() {
                let current = changes.borrow_and_update().clone();
                session.set(current);
            }
        }
    });

    children
}

/// Hook to access the auth context
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>()
}
