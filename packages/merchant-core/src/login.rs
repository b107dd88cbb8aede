//! Returning-merchant login: phone + PIN

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{info, warn};

use crate::busy::BusyFlag;
use crate::format::redact_phone;
use crate::notice::{Notice, Submission};
use crate::session::AuthStore;
use crate::traits::BaseAuthApi;

const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginFields {
    pub phone: String,
    pub pin: String,
}

impl LoginFields {
    pub fn is_complete(&self) -> bool {
        !self.phone.trim().is_empty()
            && self.pin.len() == 4
            && self.pin.chars().all(|c| c.is_ascii_digit())
    }
}

/// Login form state and its single action
pub struct LoginForm {
    api: Arc<dyn BaseAuthApi>,
    auth: Arc<AuthStore>,
    fields: Mutex<LoginFields>,
    busy: BusyFlag,
}

impl LoginForm {
    pub fn new(api: Arc<dyn BaseAuthApi>, auth: Arc<AuthStore>) -> Self {
        Self {
            api,
            auth,
            fields: Mutex::new(LoginFields::default()),
            busy: BusyFlag::new(),
        }
    }

    pub fn fields(&self) -> LoginFields {
        self.lock().clone()
    }

    pub fn set_phone(&self, phone: &str) {
        self.lock().phone = phone.to_string();
    }

    /// Keeps digits only, at most four
    pub fn set_pin(&self, pin: &str) {
        self.lock().pin = pin.chars().filter(char::is_ascii_digit).take(4).collect();
    }

    pub fn is_loading(&self) -> bool {
        self.busy.is_busy()
    }

    pub fn can_submit(&self) -> bool {
        !self.is_loading() && self.lock().is_complete()
    }

    /// Log in and hand the session to the authentication context
    pub async fn submit(&self) -> Submission {
        let Some(_guard) = self.busy.try_begin() else {
            return Submission::Busy;
        };

        let fields = self.fields();
        if !fields.is_complete() {
            return Submission::Rejected("Enter your phone number and 4-digit PIN".to_string());
        }
        let phone = fields.phone.trim();

        match self.api.login(phone, &fields.pin).await {
            Ok(response) => {
                info!(phone = %redact_phone(phone), "Merchant logged in");
                let greeting = format!("Welcome back, {}", response.merchant.name);
                self.auth.set(response.token, response.merchant);
                Submission::Settled(Some(Notice::Success(greeting)))
            }
            Err(e) => {
                warn!("Login failed: {}", e);
                Submission::Settled(Some(Notice::Error(e.user_message(LOGIN_FAILED))))
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LoginFields> {
        self.fields.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{rejected, rejected_without_message, AuthCall, MockAuthApi};

    fn login_form(api: MockAuthApi) -> (Arc<MockAuthApi>, Arc<AuthStore>, LoginForm) {
        let api = Arc::new(api);
        let auth = Arc::new(AuthStore::in_memory());
        let form = LoginForm::new(api.clone(), auth.clone());
        form.set_phone("+2348012345678");
        form.set_pin("1234");
        (api, auth, form)
    }

    #[tokio::test]
    async fn successful_login_sets_session_and_greets() {
        let (api, auth, form) = login_form(MockAuthApi::new().with_login("t1", "Acme"));

        let result = form.submit().await;

        assert_eq!(
            result,
            Submission::Settled(Some(Notice::success("Welcome back, Acme")))
        );
        assert_eq!(auth.token().as_deref(), Some("t1"));
        assert_eq!(
            api.calls(),
            vec![AuthCall::Login {
                phone: "+2348012345678".to_string(),
                pin: "1234".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn failures_show_server_reason_or_fallback() {
        let (_, auth, form) = login_form(MockAuthApi::new().with_login_error(rejected(401, "Invalid PIN")));
        assert_eq!(
            form.submit().await,
            Submission::Settled(Some(Notice::error("Invalid PIN")))
        );
        assert!(!auth.is_authenticated());

        let (_, _, form) = login_form(MockAuthApi::new().with_login_error(rejected_without_message(500)));
        assert_eq!(form.submit().await.notice().map(Notice::message), Some(LOGIN_FAILED));
    }

    #[tokio::test]
    async fn incomplete_pin_sends_nothing() {
        let (api, _, form) = login_form(MockAuthApi::new());
        form.set_pin("12a");

        assert_eq!(form.fields().pin, "12");
        assert!(!form.can_submit());
        assert!(matches!(form.submit().await, Submission::Rejected(_)));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn second_submit_while_outstanding_is_busy() {
        let (api, _, form) = login_form(MockAuthApi::new());
        let release = api.hold_next_call();

        let first = form.submit();
        let second = async {
            tokio::task::yield_now().await;
            let second = form.submit().await;
            let _ = release.send(());
            second
        };
        let (first, second) = tokio::join!(first, second);

        assert!(second.is_busy());
        assert!(matches!(first, Submission::Settled(Some(Notice::Success(_)))));
        assert_eq!(api.login_count(), 1);
    }
}
