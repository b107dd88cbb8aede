// Signup flow against a recording auth API
//
// Drives SignupFlow end to end with MockAuthApi: happy paths, the existing
// account branch, change-phone reset, the re-submission guard and the
// set-pin/login retry.

use std::sync::Arc;

use merchant_core::signup::{ACCOUNT_CREATED, ACCOUNT_EXISTS, NAME_STILL_REQUIRED, OTP_SENT};
use merchant_core::testing::{rejected, rejected_without_message, AuthCall, MockAuthApi};
use merchant_core::{AuthSession, AuthStore, Merchant, Notice, SignupFlow, SignupStep, Submission};

const PHONE: &str = "+2348012345678";

struct Harness {
    api: Arc<MockAuthApi>,
    auth: Arc<AuthStore>,
    flow: SignupFlow,
}

fn harness(api: MockAuthApi) -> Harness {
    let api = Arc::new(api);
    let auth = Arc::new(AuthStore::in_memory());
    let flow = SignupFlow::new(api.clone(), auth.clone());
    Harness { api, auth, flow }
}

fn success(message: &str) -> Submission {
    Submission::Settled(Some(Notice::success(message)))
}

fn error(message: &str) -> Submission {
    Submission::Settled(Some(Notice::error(message)))
}

/// Phone entered and code requested
async fn at_otp(h: &Harness) {
    h.flow.set_phone(PHONE);
    assert_eq!(h.flow.request_code().await, success(OTP_SENT));
    assert_eq!(h.flow.step(), SignupStep::Otp);
}

/// Code verified, server asked for a PIN
async fn at_pin(h: &Harness) {
    at_otp(h).await;
    h.flow.set_otp("123456");
    h.flow.verify_code().await;
    assert_eq!(h.flow.step(), SignupStep::Pin);
}

#[tokio::test]
async fn new_merchant_without_name_prompt() {
    let h = harness(
        MockAuthApi::new()
            .with_otp_sent("OTP sent")
            .with_verify(false, true)
            .with_login("t1", "Acme"),
    );

    h.flow.set_phone(PHONE);
    assert_eq!(h.flow.request_code().await, success(OTP_SENT));
    assert_eq!(h.flow.step(), SignupStep::Otp);
    assert_eq!(h.flow.snapshot().message.as_deref(), Some("OTP sent"));

    h.flow.set_otp("123456");
    assert!(h.flow.can_verify());
    assert_eq!(h.flow.verify_code().await, Submission::Settled(None));
    assert_eq!(h.flow.step(), SignupStep::Pin);

    h.flow.set_pin("1234");
    assert!(h.flow.can_create_account());
    assert_eq!(h.flow.create_account().await, success(ACCOUNT_CREATED));

    assert_eq!(
        h.auth.current(),
        Some(AuthSession::new("t1", Merchant::named("Acme")))
    );
    assert!(h.flow.snapshot().completed);
    assert_eq!(
        h.api.calls(),
        vec![
            AuthCall::RequestOtp {
                phone: PHONE.to_string()
            },
            AuthCall::VerifyOtp {
                phone: PHONE.to_string(),
                otp: "123456".to_string(),
                name: None,
            },
            AuthCall::SetPin {
                phone: PHONE.to_string(),
                pin: "1234".to_string(),
            },
            AuthCall::Login {
                phone: PHONE.to_string(),
                pin: "1234".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn existing_account_stays_on_code_step() {
    let h = harness(MockAuthApi::new().with_verify(false, false));
    at_otp(&h).await;

    h.flow.set_otp("123456");
    assert_eq!(h.flow.verify_code().await, error(ACCOUNT_EXISTS));

    let session = h.flow.snapshot();
    assert_eq!(session.step, SignupStep::Otp);
    assert_eq!(session.error.as_deref(), Some("Account already exists. Please sign in instead."));
    assert!(!h.auth.is_authenticated());
}

#[tokio::test]
async fn name_is_sent_with_the_repeated_verification() {
    let h = harness(
        MockAuthApi::new()
            .with_verify(true, false)
            .with_verify(true, false)
            .with_verify(false, true),
    );
    at_otp(&h).await;

    h.flow.set_otp("123456");
    h.flow.verify_code().await;
    assert_eq!(h.flow.step(), SignupStep::Name);

    // Blank name never reaches the server
    assert!(matches!(h.flow.submit_name().await, Submission::Rejected(_)));

    h.flow.set_name("Acme Transport");
    assert_eq!(h.flow.submit_name().await, error(NAME_STILL_REQUIRED));
    assert_eq!(h.flow.step(), SignupStep::Name);

    assert_eq!(h.flow.submit_name().await, Submission::Settled(None));
    assert_eq!(h.flow.step(), SignupStep::Pin);

    let calls = h.api.calls();
    assert_eq!(
        calls.last(),
        Some(&AuthCall::VerifyOtp {
            phone: PHONE.to_string(),
            otp: "123456".to_string(),
            name: Some("Acme Transport".to_string()),
        })
    );
}

#[tokio::test]
async fn name_step_moves_on_when_pin_setup_is_required_alongside_name() {
    let h = harness(
        MockAuthApi::new()
            .with_verify(true, false)
            .with_verify(true, true),
    );
    at_otp(&h).await;

    h.flow.set_otp("123456");
    h.flow.verify_code().await;
    assert_eq!(h.flow.step(), SignupStep::Name);

    h.flow.set_name("Acme");
    assert_eq!(h.flow.submit_name().await, Submission::Settled(None));
    assert_eq!(h.flow.step(), SignupStep::Pin);
    assert_eq!(h.flow.snapshot().error, None);
}

#[tokio::test]
async fn failures_keep_the_step_and_show_the_reason() {
    let h = harness(
        MockAuthApi::new()
            .with_request_otp_error(rejected_without_message(503))
            .with_verify_error(rejected(400, "OTP expired")),
    );

    h.flow.set_phone(PHONE);
    assert_eq!(h.flow.request_code().await, error("Failed to send OTP"));
    assert_eq!(h.flow.step(), SignupStep::Phone);

    at_otp(&h).await;
    h.flow.set_otp("123456");
    assert_eq!(h.flow.verify_code().await, error("OTP expired"));
    assert_eq!(h.flow.step(), SignupStep::Otp);
    assert_eq!(h.flow.snapshot().error.as_deref(), Some("OTP expired"));
}

#[tokio::test]
async fn verify_is_gated_on_six_digits() {
    let h = harness(MockAuthApi::new());
    at_otp(&h).await;

    h.flow.set_otp("12345");
    assert!(!h.flow.can_verify());
    assert!(matches!(h.flow.verify_code().await, Submission::Rejected(_)));

    h.flow.set_otp("12ab34567");
    assert_eq!(h.flow.snapshot().otp, "123456");
    assert!(h.flow.can_verify());

    // Only the request-otp call went out
    assert_eq!(h.api.calls().len(), 1);
}

#[tokio::test]
async fn create_account_is_gated_on_four_digits() {
    let h = harness(MockAuthApi::new());
    at_pin(&h).await;

    h.flow.set_pin("123");
    assert!(!h.flow.can_create_account());
    assert!(matches!(h.flow.create_account().await, Submission::Rejected(_)));
    assert_eq!(h.api.set_pin_count(), 0);
}

#[tokio::test]
async fn change_phone_keeps_phone_and_clears_code() {
    let h = harness(MockAuthApi::new());
    assert!(!h.flow.change_phone());

    at_otp(&h).await;
    h.flow.set_otp("12");

    assert!(h.flow.change_phone());

    let session = h.flow.snapshot();
    assert_eq!(session.step, SignupStep::Phone);
    assert_eq!(session.phone, PHONE);
    assert_eq!(session.otp, "");
    assert_eq!(session.message, None);
}

#[tokio::test]
async fn repeated_request_while_outstanding_sends_once() {
    let h = harness(MockAuthApi::new());
    h.flow.set_phone(PHONE);
    let release = h.api.hold_next_call();

    let (first, second) = tokio::join!(h.flow.request_code(), async {
        tokio::task::yield_now().await;
        assert!(h.flow.snapshot().loading);
        let second = h.flow.request_code().await;
        let _ = release.send(());
        second
    });

    assert_eq!(second, Submission::Busy);
    assert_eq!(first, success(OTP_SENT));
    assert_eq!(h.api.calls().len(), 1);
    assert!(!h.flow.snapshot().loading);
}

#[tokio::test]
async fn settlement_after_change_phone_is_dropped() {
    let h = harness(MockAuthApi::new().with_verify(false, true));
    at_otp(&h).await;
    h.flow.set_otp("123456");
    let release = h.api.hold_next_call();

    let (verified, _) = tokio::join!(h.flow.verify_code(), async {
        tokio::task::yield_now().await;
        h.flow.change_phone();
        let _ = release.send(());
    });

    assert_eq!(verified, Submission::Settled(None));
    assert_eq!(h.flow.step(), SignupStep::Phone);
}

#[tokio::test]
async fn phone_can_be_resent_after_changing_it_mid_request() {
    let h = harness(MockAuthApi::new().with_verify(false, true));
    at_otp(&h).await;
    h.flow.set_otp("123456");
    let release = h.api.hold_next_call();

    let (verified, changed) = tokio::join!(h.flow.verify_code(), async {
        tokio::task::yield_now().await;
        let changed = h.flow.change_phone();
        let _ = release.send(());
        changed
    });

    assert!(changed);
    assert_eq!(verified, Submission::Settled(None));
    assert!(!h.flow.snapshot().loading);
    assert_eq!(h.flow.snapshot().otp, "");

    h.flow.set_phone("+2348098765432");
    assert_eq!(h.flow.request_code().await, success(OTP_SENT));
    assert_eq!(h.flow.step(), SignupStep::Otp);
    assert_eq!(
        h.api.calls().last(),
        Some(&AuthCall::RequestOtp {
            phone: "+2348098765432".to_string()
        })
    );
}

#[tokio::test]
async fn login_retry_skips_pin_already_set() {
    let h = harness(
        MockAuthApi::new()
            .with_login_error(rejected(500, "Service unavailable"))
            .with_login("t1", "Acme"),
    );
    at_pin(&h).await;
    h.flow.set_pin("1234");

    assert_eq!(h.flow.create_account().await, error("Service unavailable"));
    assert_eq!(h.flow.step(), SignupStep::Pin);
    assert!(!h.auth.is_authenticated());

    assert_eq!(h.flow.create_account().await, success(ACCOUNT_CREATED));
    assert_eq!(h.api.set_pin_count(), 1);
    assert_eq!(h.api.login_count(), 2);
    assert_eq!(h.auth.token().as_deref(), Some("t1"));
}

#[tokio::test]
async fn changed_pin_is_set_again() {
    let h = harness(MockAuthApi::new().with_login_error(rejected_without_message(500)));
    at_pin(&h).await;
    h.flow.set_pin("1234");

    assert_eq!(h.flow.create_account().await, error("Failed to set PIN"));

    h.flow.set_pin("4321");
    assert_eq!(h.flow.create_account().await, success(ACCOUNT_CREATED));
    assert_eq!(h.api.set_pin_count(), 2);
}

#[tokio::test]
async fn set_pin_failure_skips_login() {
    let h = harness(MockAuthApi::new().with_set_pin_error(rejected(400, "PIN too weak")));
    at_pin(&h).await;
    h.flow.set_pin("1111");

    assert_eq!(h.flow.create_account().await, error("PIN too weak"));
    assert_eq!(h.api.login_count(), 0);
}

#[tokio::test]
async fn subscribers_see_step_changes() {
    let h = harness(MockAuthApi::new());
    let mut rx = h.flow.subscribe();

    at_otp(&h).await;

    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().step, SignupStep::Otp);
}
