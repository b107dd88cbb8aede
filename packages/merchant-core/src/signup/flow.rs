//! Signup flow controller.
//!
//! Holds the signup session, runs each step's API call, and feeds the
//! settlement to [`SignupMachine`]. Observers subscribe to session snapshots.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::{debug, warn};

use super::machine::{SignupCommand, SignupEvent, SignupMachine, SignupStep, VerifyFlags, ACCOUNT_CREATED};
use crate::busy::BusyFlag;
use crate::format::redact_phone;
use crate::notice::{Notice, Submission};
use crate::session::{AuthSession, AuthStore};
use crate::traits::BaseAuthApi;

pub const OTP_LENGTH: usize = 6;
pub const PIN_LENGTH: usize = 4;

const SEND_OTP_FAILED: &str = "Failed to send OTP";
const VERIFY_OTP_FAILED: &str = "Failed to verify OTP";
const CREATE_ACCOUNT_FAILED: &str = "Failed to create account";
const SET_PIN_FAILED: &str = "Failed to set PIN";

/// Everything the signup screen renders
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupSession {
    pub step: SignupStep,
    pub phone: String,
    pub otp: String,
    pub name: String,
    pub pin: String,
    /// Last error, shown inline
    pub error: Option<String>,
    /// Server message from request-otp, shown on the code step
    pub message: Option<String>,
    /// A request is outstanding
    pub loading: bool,
    /// Account created and handed to the authentication context
    pub completed: bool,
}

impl SignupSession {
    pub fn otp_complete(&self) -> bool {
        is_digits(&self.otp, OTP_LENGTH)
    }

    pub fn pin_complete(&self) -> bool {
        is_digits(&self.pin, PIN_LENGTH)
    }
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

fn digits_only(value: &str, max: usize) -> String {
    value.chars().filter(char::is_ascii_digit).take(max).collect()
}

/// Phone and PIN last accepted by set-pin
#[derive(Debug, Clone, PartialEq, Eq)]
struct PinOnServer {
    phone: String,
    pin: String,
}

/// Drives phone -> code -> (name) -> PIN
pub struct SignupFlow {
    api: Arc<dyn BaseAuthApi>,
    auth: Arc<AuthStore>,
    machine: Mutex<SignupMachine>,
    session: watch::Sender<SignupSession>,
    busy: BusyFlag,
    pin_on_server: Mutex<Option<PinOnServer>>,
}

/// Marks the session loading for as long as it lives
struct InFlight<'a> {
    flow: &'a SignupFlow,
    _guard: crate::busy::BusyGuard<'a>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.flow.session.send_modify(|s| s.loading = false);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SignupFlow {
    pub fn new(api: Arc<dyn BaseAuthApi>, auth: Arc<AuthStore>) -> Self {
        let (session, _) = watch::channel(SignupSession::default());
        Self {
            api,
            auth,
            machine: Mutex::new(SignupMachine::new()),
            session,
            busy: BusyFlag::new(),
            pin_on_server: Mutex::new(None),
        }
    }

    pub fn snapshot(&self) -> SignupSession {
        self.session.borrow().clone()
    }

    pub fn step(&self) -> SignupStep {
        self.session.borrow().step
    }

    /// Receiver that wakes on every session change
    pub fn subscribe(&self) -> watch::Receiver<SignupSession> {
        self.session.subscribe()
    }

    // =========================================================================
    // Inputs
    // =========================================================================

    pub fn set_phone(&self, phone: &str) {
        self.session.send_modify(|s| s.phone = phone.to_string());
    }

    /// Keeps digits only, at most six
    pub fn set_otp(&self, otp: &str) {
        let otp = digits_only(otp, OTP_LENGTH);
        self.session.send_modify(|s| s.otp = otp);
    }

    pub fn set_name(&self, name: &str) {
        self.session.send_modify(|s| s.name = name.to_string());
    }

    /// Keeps digits only, at most four
    pub fn set_pin(&self, pin: &str) {
        let pin = digits_only(pin, PIN_LENGTH);
        self.session.send_modify(|s| s.pin = pin);
    }

    // =========================================================================
    // Gating
    // =========================================================================

    /// The verify button is enabled
    pub fn can_verify(&self) -> bool {
        let s = self.session.borrow();
        s.step == SignupStep::Otp && s.otp_complete() && !s.loading
    }

    /// The create-account button may submit
    pub fn can_create_account(&self) -> bool {
        let s = self.session.borrow();
        s.step == SignupStep::Pin && s.pin_complete() && !s.loading && !s.completed
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Phone step: ask the server to text a code
    pub async fn request_code(&self) -> Submission {
        let Some(_in_flight) = self.begin() else {
            return Submission::Busy;
        };

        let phone = {
            let s = self.session.borrow();
            if s.step != SignupStep::Phone {
                return Submission::Rejected("Code already requested".to_string());
            }
            s.phone.trim().to_string()
        };
        if phone.is_empty() {
            return self.reject("Please enter your phone number");
        }

        debug!(phone = %redact_phone(&phone), "Requesting signup OTP");
        let event = match self.api.request_otp(&phone).await {
            Ok(response) => {
                self.session.send_modify(|s| s.message = response.message.clone());
                SignupEvent::CodeSent
            }
            Err(e) => {
                warn!("request-otp failed: {}", e);
                SignupEvent::Failed {
                    message: e.user_message(SEND_OTP_FAILED),
                }
            }
        };

        self.settle(SignupStep::Phone, event)
    }

    /// Code step: verify without a name
    pub async fn verify_code(&self) -> Submission {
        let Some(_in_flight) = self.begin() else {
            return Submission::Busy;
        };

        let (phone, otp) = {
            let s = self.session.borrow();
            if s.step != SignupStep::Otp {
                return Submission::Rejected("Not waiting for a code".to_string());
            }
            (s.phone.trim().to_string(), s.otp.clone())
        };
        if !is_digits(&otp, OTP_LENGTH) {
            return self.reject("Enter the 6-digit code");
        }

        let event = self.verify(&phone, &otp, None, VERIFY_OTP_FAILED).await;
        self.settle(SignupStep::Otp, event)
    }

    /// Name step: repeat the verification, now carrying the name
    pub async fn submit_name(&self) -> Submission {
        let Some(_in_flight) = self.begin() else {
            return Submission::Busy;
        };

        let (phone, otp, name) = {
            let s = self.session.borrow();
            if s.step != SignupStep::Name {
                return Submission::Rejected("Not waiting for a name".to_string());
            }
            (s.phone.trim().to_string(), s.otp.clone(), s.name.trim().to_string())
        };
        if name.is_empty() {
            return self.reject("Please enter your business name");
        }

        let event = self
            .verify(&phone, &otp, Some(&name), CREATE_ACCOUNT_FAILED)
            .await;
        self.settle(SignupStep::Name, event)
    }

    /// PIN step: set the PIN, then log in with it.
    ///
    /// When a previous attempt already set this PIN for this phone and only the
    /// login failed, the retry goes straight to login.
    pub async fn create_account(&self) -> Submission {
        let Some(_in_flight) = self.begin() else {
            return Submission::Busy;
        };

        let (phone, pin) = {
            let s = self.session.borrow();
            if s.step != SignupStep::Pin || s.completed {
                return Submission::Rejected("Not waiting for a PIN".to_string());
            }
            (s.phone.trim().to_string(), s.pin.clone())
        };
        if !is_digits(&pin, PIN_LENGTH) {
            return self.reject("PIN must be 4 digits");
        }

        let attempt = PinOnServer {
            phone: phone.clone(),
            pin: pin.clone(),
        };
        let already_set = lock(&self.pin_on_server).as_ref() == Some(&attempt);

        if already_set {
            debug!("PIN already set for this phone, retrying login only");
        } else {
            if let Err(e) = self.api.set_pin(&phone, &pin).await {
                warn!("set-pin failed: {}", e);
                let event = SignupEvent::Failed {
                    message: e.user_message(SET_PIN_FAILED),
                };
                return self.settle(SignupStep::Pin, event);
            }
            *lock(&self.pin_on_server) = Some(attempt);
        }

        let event = match self.api.login(&phone, &pin).await {
            Ok(response) => {
                SignupEvent::AccountCreated(AuthSession::new(response.token, response.merchant))
            }
            Err(e) => {
                warn!("login after set-pin failed: {}", e);
                SignupEvent::Failed {
                    message: e.user_message(SET_PIN_FAILED),
                }
            }
        };

        self.settle(SignupStep::Pin, event)
    }

    /// "Change phone number": back to the phone step.
    ///
    /// Keeps the phone for editing and drops the code, name, PIN and messages.
    /// Returns false when already on the phone step.
    pub fn change_phone(&self) -> bool {
        let before = self.step();
        self.settle(before, SignupEvent::ChangePhoneRequested);
        before != SignupStep::Phone
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn begin(&self) -> Option<InFlight<'_>> {
        let guard = self.busy.try_begin()?;
        self.session.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });
        Some(InFlight {
            flow: self,
            _guard: guard,
        })
    }

    fn reject(&self, message: &str) -> Submission {
        self.session.send_modify(|s| s.error = Some(message.to_string()));
        Submission::Rejected(message.to_string())
    }

    async fn verify(
        &self,
        phone: &str,
        otp: &str,
        name: Option<&str>,
        fallback: &str,
    ) -> SignupEvent {
        match self.api.verify_otp(phone, otp, name).await {
            Ok(response) => SignupEvent::CodeVerified(VerifyFlags::from(&response)),
            Err(e) => {
                warn!("verify-otp failed: {}", e);
                SignupEvent::Failed {
                    message: e.user_message(fallback),
                }
            }
        }
    }

    /// Feed a settlement to the machine and apply its command.
    ///
    /// Settlements for a step the merchant has since left are dropped.
    fn settle(&self, origin: SignupStep, event: SignupEvent) -> Submission {
        let (step, command) = {
            let mut machine = lock(&self.machine);
            if machine.step() != origin {
                debug!(?origin, current = ?machine.step(), "Dropping stale signup settlement");
                return Submission::Settled(None);
            }
            let command = machine.decide(&event);
            (machine.step(), command)
        };

        self.session.send_modify(|s| s.step = step);

        let notice = match command {
            None => None,
            Some(SignupCommand::ShowSuccess(message)) => Some(Notice::Success(message)),
            Some(SignupCommand::ShowError(message)) => {
                self.session.send_modify(|s| s.error = Some(message.clone()));
                Some(Notice::Error(message))
            }
            Some(SignupCommand::Authenticate(session)) => {
                self.auth.set(session.token, session.merchant);
                self.session.send_modify(|s| s.completed = true);
                Some(Notice::success(ACCOUNT_CREATED))
            }
            Some(SignupCommand::DiscardCode) => {
                *lock(&self.pin_on_server) = None;
                self.session.send_modify(|s| {
                    s.otp.clear();
                    s.name.clear();
                    s.pin.clear();
                    s.error = None;
                    s.message = None;
                });
                None
            }
        };

        Submission::Settled(notice)
    }
}
