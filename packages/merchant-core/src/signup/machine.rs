//! Signup state machine.
//!
//! Pure decisions only: no IO, no async. The machine maps the current step and
//! a settled server response to the next step and at most one command for the
//! flow to execute. The server's response flags are the only input deciding
//! whether a name or a PIN is needed next.

use proof_client::VerifyOtpResponse;
use tracing::{debug, info};

use crate::session::AuthSession;

pub const ACCOUNT_EXISTS: &str = "Account already exists. Please sign in instead.";
pub const NAME_STILL_REQUIRED: &str = "Please enter your business name to continue.";
pub const OTP_SENT: &str = "OTP sent successfully";
pub const ACCOUNT_CREATED: &str = "Account created successfully! Welcome to Proof Platform.";

/// Stage of the signup sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum SignupStep {
    #[default]
    Phone,
    Otp,
    Name,
    Pin,
}

impl SignupStep {
    pub fn title(&self) -> &'static str {
        match self {
            SignupStep::Phone => "Create an account",
            SignupStep::Otp => "Verify your phone",
            SignupStep::Name => "Complete your profile",
            SignupStep::Pin => "Set up security",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            SignupStep::Phone => "Join Proof Platform to start accepting verified payments",
            SignupStep::Otp => "We sent a code to your phone number",
            SignupStep::Name => "Tell us your business name",
            SignupStep::Pin => "Secure your account with a 4-digit PIN",
        }
    }
}

/// Flags returned by verify-otp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VerifyFlags {
    pub requires_name: bool,
    pub requires_pin_setup: bool,
}

impl VerifyFlags {
    pub fn new(requires_name: bool, requires_pin_setup: bool) -> Self {
        Self {
            requires_name,
            requires_pin_setup,
        }
    }
}

impl From<&VerifyOtpResponse> for VerifyFlags {
    fn from(response: &VerifyOtpResponse) -> Self {
        Self::new(response.requires_name, response.requires_pin_setup)
    }
}

/// What the server said after checking a code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// New merchant; the server wants a business name first
    NeedsName,
    /// Verified; a PIN must be chosen
    NeedsPin,
    /// Neither flag set: the phone already has an account
    AccountExists,
}

impl VerifyOutcome {
    /// Reading of the flags on the code step: `requiresName` wins when both
    /// are set.
    pub fn from_flags(requires_name: bool, requires_pin_setup: bool) -> Self {
        match (requires_name, requires_pin_setup) {
            (true, _) => VerifyOutcome::NeedsName,
            (false, true) => VerifyOutcome::NeedsPin,
            (false, false) => VerifyOutcome::AccountExists,
        }
    }

    /// Reading of the flags after the name was sent: `requiresPinSetup` alone
    /// moves on to the PIN.
    pub fn after_name(requires_name: bool, requires_pin_setup: bool) -> Self {
        match (requires_pin_setup, requires_name) {
            (true, _) => VerifyOutcome::NeedsPin,
            (false, true) => VerifyOutcome::NeedsName,
            (false, false) => VerifyOutcome::AccountExists,
        }
    }

    /// Outcome of a verification settled on `step`
    pub fn at(step: SignupStep, flags: VerifyFlags) -> Self {
        match step {
            SignupStep::Name => Self::after_name(flags.requires_name, flags.requires_pin_setup),
            _ => Self::from_flags(flags.requires_name, flags.requires_pin_setup),
        }
    }
}

/// Facts fed to the machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupEvent {
    /// request-otp succeeded
    CodeSent,
    /// verify-otp succeeded (with or without a name)
    CodeVerified(VerifyFlags),
    /// set-pin and login both succeeded
    AccountCreated(AuthSession),
    /// Any call failed; carries the display message
    Failed { message: String },
    /// Merchant chose "Change phone number"
    ChangePhoneRequested,
}

/// Side effects for the flow to carry out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupCommand {
    ShowSuccess(String),
    ShowError(String),
    /// Hand the session to the authentication context
    Authenticate(AuthSession),
    /// Forget the code (and everything entered after it)
    DiscardCode,
}

/// Next step plus the command the event produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: SignupStep,
    pub command: Option<SignupCommand>,
}

impl Transition {
    fn to(next: SignupStep) -> Self {
        Self { next, command: None }
    }

    fn stay(step: SignupStep, command: Option<SignupCommand>) -> Self {
        Self { next: step, command }
    }
}

/// The transition function. Steps only move forward, except the explicit
/// change-phone reset back to [`SignupStep::Phone`].
pub fn transition(step: SignupStep, event: &SignupEvent) -> Transition {
    use SignupCommand::*;
    use SignupEvent::*;
    use SignupStep::*;

    match (step, event) {
        (Phone, CodeSent) => Transition {
            next: Otp,
            command: Some(ShowSuccess(OTP_SENT.to_string())),
        },

        (Otp | Name, CodeVerified(flags)) => match VerifyOutcome::at(step, *flags) {
            VerifyOutcome::NeedsName if step == Otp => Transition::to(Name),
            VerifyOutcome::NeedsName => {
                Transition::stay(Name, Some(ShowError(NAME_STILL_REQUIRED.to_string())))
            }
            VerifyOutcome::NeedsPin => Transition::to(Pin),
            VerifyOutcome::AccountExists => {
                Transition::stay(step, Some(ShowError(ACCOUNT_EXISTS.to_string())))
            }
        },

        (Pin, AccountCreated(session)) => Transition::stay(Pin, Some(Authenticate(session.clone()))),

        (_, Failed { message }) => Transition::stay(step, Some(ShowError(message.clone()))),

        (Phone, ChangePhoneRequested) => Transition::to(Phone),
        (_, ChangePhoneRequested) => Transition {
            next: Phone,
            command: Some(DiscardCode),
        },

        // Settlement for a step we are no longer on
        (_, event) => {
            debug!(?step, ?event, "Ignoring signup event outside its step");
            Transition::to(step)
        }
    }
}

/// Signup machine - owns the current step and decides on commands
#[derive(Debug, Clone, Default)]
pub struct SignupMachine {
    step: SignupStep,
}

impl SignupMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> SignupStep {
        self.step
    }

    pub fn decide(&mut self, event: &SignupEvent) -> Option<SignupCommand> {
        let Transition { next, command } = transition(self.step, event);
        if next != self.step {
            info!(from = ?self.step, to = ?next, "Signup step changed");
            self.step = next;
        }
        command
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proof_client::Merchant;

    fn verified(requires_name: bool, requires_pin_setup: bool) -> SignupEvent {
        SignupEvent::CodeVerified(VerifyFlags::new(requires_name, requires_pin_setup))
    }

    fn failed(message: &str) -> SignupEvent {
        SignupEvent::Failed {
            message: message.to_string(),
        }
    }

    #[test]
    fn flags_map_to_outcomes() {
        assert_eq!(VerifyOutcome::from_flags(true, false), VerifyOutcome::NeedsName);
        assert_eq!(VerifyOutcome::from_flags(false, true), VerifyOutcome::NeedsPin);
        assert_eq!(VerifyOutcome::from_flags(false, false), VerifyOutcome::AccountExists);
        assert_eq!(VerifyOutcome::from_flags(true, true), VerifyOutcome::NeedsName);
    }

    #[test]
    fn pin_setup_wins_once_the_name_is_sent() {
        let both = VerifyFlags::new(true, true);
        assert_eq!(VerifyOutcome::at(SignupStep::Otp, both), VerifyOutcome::NeedsName);
        assert_eq!(VerifyOutcome::at(SignupStep::Name, both), VerifyOutcome::NeedsPin);
        assert_eq!(
            VerifyOutcome::at(SignupStep::Name, VerifyFlags::new(true, false)),
            VerifyOutcome::NeedsName
        );
    }

    #[test]
    fn only_code_sent_leaves_phone() {
        let leaving = [
            SignupEvent::CodeSent,
            verified(true, false),
            verified(false, true),
            verified(false, false),
            failed("Failed to send OTP"),
            SignupEvent::ChangePhoneRequested,
            SignupEvent::AccountCreated(AuthSession::new("t", Merchant::named("x"))),
        ];

        for event in leaving {
            let t = transition(SignupStep::Phone, &event);
            let expected = if event == SignupEvent::CodeSent {
                SignupStep::Otp
            } else {
                SignupStep::Phone
            };
            assert_eq!(t.next, expected, "event {:?}", event);
        }
    }

    #[test]
    fn change_phone_from_phone_is_a_no_op() {
        let t = transition(SignupStep::Phone, &SignupEvent::ChangePhoneRequested);
        assert_eq!(t, Transition::to(SignupStep::Phone));
    }

    #[test]
    fn verify_branches_on_server_flags() {
        assert_eq!(transition(SignupStep::Otp, &verified(true, false)).next, SignupStep::Name);
        assert_eq!(transition(SignupStep::Otp, &verified(false, true)).next, SignupStep::Pin);

        let t = transition(SignupStep::Otp, &verified(false, false));
        assert_eq!(t.next, SignupStep::Otp);
        assert_eq!(t.command, Some(SignupCommand::ShowError(ACCOUNT_EXISTS.to_string())));
    }

    #[test]
    fn name_step_needs_pin_setup_to_advance() {
        assert_eq!(transition(SignupStep::Name, &verified(false, true)).next, SignupStep::Pin);
        assert_eq!(transition(SignupStep::Name, &verified(true, true)).next, SignupStep::Pin);
        assert_eq!(transition(SignupStep::Otp, &verified(true, true)).next, SignupStep::Name);

        let t = transition(SignupStep::Name, &verified(true, false));
        assert_eq!(t.next, SignupStep::Name);
        assert!(matches!(t.command, Some(SignupCommand::ShowError(_))));

        let t = transition(SignupStep::Name, &verified(false, false));
        assert_eq!(t.next, SignupStep::Name);
        assert_eq!(t.command, Some(SignupCommand::ShowError(ACCOUNT_EXISTS.to_string())));
    }

    #[test]
    fn failures_stay_put_with_the_message() {
        for step in [SignupStep::Phone, SignupStep::Otp, SignupStep::Name, SignupStep::Pin] {
            let t = transition(step, &failed("OTP expired"));
            assert_eq!(t.next, step);
            assert_eq!(t.command, Some(SignupCommand::ShowError("OTP expired".to_string())));
        }
    }

    #[test]
    fn change_phone_resets_from_later_steps() {
        for step in [SignupStep::Otp, SignupStep::Name, SignupStep::Pin] {
            let t = transition(step, &SignupEvent::ChangePhoneRequested);
            assert_eq!(t.next, SignupStep::Phone);
            assert_eq!(t.command, Some(SignupCommand::DiscardCode));
        }
    }

    #[test]
    fn account_created_authenticates() {
        let session = AuthSession::new("t1", Merchant::named("Acme"));
        let t = transition(SignupStep::Pin, &SignupEvent::AccountCreated(session.clone()));
        assert_eq!(t.command, Some(SignupCommand::Authenticate(session)));
    }

    #[test]
    fn out_of_step_events_are_ignored() {
        let t = transition(SignupStep::Pin, &SignupEvent::CodeSent);
        assert_eq!(t, Transition::to(SignupStep::Pin));

        let t = transition(SignupStep::Phone, &verified(false, true));
        assert_eq!(t, Transition::to(SignupStep::Phone));
    }

    #[test]
    fn machine_tracks_step() {
        let mut machine = SignupMachine::new();
        assert_eq!(machine.decide(&SignupEvent::CodeSent), Some(SignupCommand::ShowSuccess(OTP_SENT.to_string())));
        assert_eq!(machine.step(), SignupStep::Otp);

        assert_eq!(machine.decide(&verified(true, false)), None);
        assert_eq!(machine.step(), SignupStep::Name);

        assert_eq!(machine.decide(&verified(false, true)), None);
        assert_eq!(machine.step(), SignupStep::Pin);
    }
}
