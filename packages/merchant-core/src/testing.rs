// Mock implementations for testing
//
// Recording stand-ins for the Base* API traits. Each mock replays queued
// responses in order (falling back to a plausible success when the queue is
// empty) and logs every call so tests can assert on what went over the wire.
//
// `hold_next_call` keeps the next call outstanding until the returned sender
// fires (or is dropped), for exercising the re-submission guard.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use proof_client::{
    ApiError, BankAccount, ConfirmPaymentResponse, CreatePaymentRequest, DailySummary,
    LoginResponse, Merchant, MerchantProfile, Payment, PaymentStatus, ProfileUpdate, Receipt,
    ReceiptMerchant, ReceiptRef, ReceiptSearchParams, ReceiptSearchResponse, RequestOtpResponse,
    VerifyOtpResponse,
};
use tokio::sync::oneshot;

use crate::traits::{BaseAuthApi, BasePaymentsApi, BaseProfileApi, BaseReceiptsApi};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A rejection carrying the server's `{ error }` message
pub fn rejected(status: u16, message: &str) -> ApiError {
    ApiError::Rejected {
        status,
        message: Some(message.to_string()),
    }
}

/// A rejection whose body had no usable `error` field
pub fn rejected_without_message(status: u16) -> ApiError {
    ApiError::Rejected {
        status,
        message: None,
    }
}

/// Queue of canned results, shared so builders and the mock see the same list
struct Replies<T>(Arc<Mutex<VecDeque<Result<T, ApiError>>>>);

impl<T> Default for Replies<T> {
    fn default() -> Self {
        Self(Arc::new(Mutex::new(VecDeque::new())))
    }
}

impl<T> Replies<T> {
    fn push(&self, reply: Result<T, ApiError>) {
        lock(&self.0).push_back(reply);
    }

    fn next_or(&self, fallback: impl FnOnce() -> T) -> Result<T, ApiError> {
        lock(&self.0).pop_front().unwrap_or_else(|| Ok(fallback()))
    }
}

/// Optional latch that keeps the next call outstanding
#[derive(Default)]
struct Gate(Mutex<Option<oneshot::Receiver<()>>>);

impl Gate {
    fn hold(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *lock(&self.0) = Some(rx);
        tx
    }

    async fn pass(&self) {
        let held = lock(&self.0).take();
        if let Some(rx) = held {
            let _ = rx.await;
        }
    }
}

// =============================================================================
// Mock Auth API
// =============================================================================

/// Arguments captured from an auth call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthCall {
    RequestOtp { phone: String },
    VerifyOtp { phone: String, otp: String, name: Option<String> },
    SetPin { phone: String, pin: String },
    Login { phone: String, pin: String },
}

#[derive(Default)]
pub struct MockAuthApi {
    request_otp: Replies<RequestOtpResponse>,
    verify_otp: Replies<VerifyOtpResponse>,
    set_pin: Replies<()>,
    login: Replies<LoginResponse>,
    calls: Arc<Mutex<Vec<AuthCall>>>,
    gate: Gate,
}

impl MockAuthApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_otp_sent(self, message: &str) -> Self {
        self.request_otp.push(Ok(RequestOtpResponse {
            message: Some(message.to_string()),
        }));
        self
    }

    pub fn with_request_otp_error(self, error: ApiError) -> Self {
        self.request_otp.push(Err(error));
        self
    }

    /// Queue a verify-otp response with the given flags
    pub fn with_verify(self, requires_name: bool, requires_pin_setup: bool) -> Self {
        self.verify_otp.push(Ok(VerifyOtpResponse {
            requires_name,
            requires_pin_setup,
            message: None,
        }));
        self
    }

    pub fn with_verify_error(self, error: ApiError) -> Self {
        self.verify_otp.push(Err(error));
        self
    }

    pub fn with_set_pin_error(self, error: ApiError) -> Self {
        self.set_pin.push(Err(error));
        self
    }

    pub fn with_login(self, token: &str, merchant_name: &str) -> Self {
        self.login.push(Ok(LoginResponse {
            token: token.to_string(),
            merchant: Merchant::named(merchant_name),
        }));
        self
    }

    pub fn with_login_error(self, error: ApiError) -> Self {
        self.login.push(Err(error));
        self
    }

    /// Keep the next call outstanding until the sender fires or drops
    pub fn hold_next_call(&self) -> oneshot::Sender<()> {
        self.gate.hold()
    }

    /// Get all calls in the order they were made
    pub fn calls(&self) -> Vec<AuthCall> {
        lock(&self.calls).clone()
    }

    pub fn set_pin_count(&self) -> usize {
        self.count(|c| matches!(c, AuthCall::SetPin { .. }))
    }

    pub fn login_count(&self) -> usize {
        self.count(|c| matches!(c, AuthCall::Login { .. }))
    }

    fn count(&self, pred: impl Fn(&AuthCall) -> bool) -> usize {
        lock(&self.calls).iter().filter(|c| pred(*c)).count()
    }

    async fn record(&self, call: AuthCall) {
        lock(&self.calls).push(call);
        self.gate.pass().await;
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl BaseAuthApi for MockAuthApi {
    async fn request_otp(&self, phone: &str) -> Result<RequestOtpResponse, ApiError> {
        self.record(AuthCall::RequestOtp {
            phone: phone.to_string(),
        })
        .await;
        self.request_otp.next_or(|| RequestOtpResponse {
            message: Some("OTP sent".to_string()),
        })
    }

    async fn verify_otp(
        &self,
        phone: &str,
        otp: &str,
        name: Option<&str>,
    ) -> Result<VerifyOtpResponse, ApiError> {
        self.record(AuthCall::VerifyOtp {
            phone: phone.to_string(),
            otp: otp.to_string(),
            name: name.map(str::to_string),
        })
        .await;
        self.verify_otp.next_or(|| VerifyOtpResponse {
            requires_name: false,
            requires_pin_setup: true,
            message: None,
        })
    }

    async fn set_pin(&self, phone: &str, pin: &str) -> Result<(), ApiError> {
        self.record(AuthCall::SetPin {
            phone: phone.to_string(),
            pin: pin.to_string(),
        })
        .await;
        self.set_pin.next_or(|| ())
    }

    async fn login(&self, phone: &str, pin: &str) -> Result<LoginResponse, ApiError> {
        self.record(AuthCall::Login {
            phone: phone.to_string(),
            pin: pin.to_string(),
        })
        .await;
        self.login.next_or(|| LoginResponse {
            token: "test-token".to_string(),
            merchant: Merchant::named("Test Merchant"),
        })
    }
}

// =============================================================================
// Mock Payments API
// =============================================================================

#[derive(Debug, Clone)]
pub enum PaymentsCall {
    DailySummary,
    ListPayments,
    MerchantQr,
    CreatePayment(CreatePaymentRequest),
    ConfirmPayment { reference: String },
}

/// A payment row for fixtures
pub fn payment(reference: &str, amount: f64, status: PaymentStatus) -> Payment {
    Payment {
        reference: reference.to_string(),
        amount,
        status,
        purpose: Some("transport_fare".to_string()),
        customer_phone: None,
        customer_name: None,
        created_at: None,
        receipt_id: None,
    }
}

#[derive(Default)]
pub struct MockPaymentsApi {
    summary: Replies<DailySummary>,
    payments: Replies<Vec<Payment>>,
    qr: Replies<String>,
    created: Replies<Payment>,
    confirmed: Replies<ConfirmPaymentResponse>,
    calls: Arc<Mutex<Vec<PaymentsCall>>>,
    gate: Gate,
}

impl MockPaymentsApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_summary(self, summary: DailySummary) -> Self {
        self.summary.push(Ok(summary));
        self
    }

    pub fn with_summary_error(self, error: ApiError) -> Self {
        self.summary.push(Err(error));
        self
    }

    pub fn with_payments(self, payments: Vec<Payment>) -> Self {
        self.payments.push(Ok(payments));
        self
    }

    pub fn with_payments_error(self, error: ApiError) -> Self {
        self.payments.push(Err(error));
        self
    }

    pub fn with_qr(self, data_url: &str) -> Self {
        self.qr.push(Ok(data_url.to_string()));
        self
    }

    pub fn with_qr_error(self, error: ApiError) -> Self {
        self.qr.push(Err(error));
        self
    }

    pub fn with_create_error(self, error: ApiError) -> Self {
        self.created.push(Err(error));
        self
    }

    /// Queue a confirmation that issued a receipt
    pub fn with_confirmed(self, receipt_id: &str) -> Self {
        self.confirmed.push(Ok(ConfirmPaymentResponse {
            success: true,
            receipt: Some(ReceiptRef {
                receipt_id: receipt_id.to_string(),
            }),
            error: None,
        }));
        self
    }

    /// Queue a confirmation the server declined
    pub fn with_declined(self, error: Option<&str>) -> Self {
        self.confirmed.push(Ok(ConfirmPaymentResponse {
            success: false,
            receipt: None,
            error: error.map(str::to_string),
        }));
        self
    }

    pub fn with_confirm_error(self, error: ApiError) -> Self {
        self.confirmed.push(Err(error));
        self
    }

    pub fn hold_next_call(&self) -> oneshot::Sender<()> {
        self.gate.hold()
    }

    pub fn calls(&self) -> Vec<PaymentsCall> {
        lock(&self.calls).clone()
    }

    async fn record(&self, call: PaymentsCall) {
        lock(&self.calls).push(call);
        self.gate.pass().await;
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl BasePaymentsApi for MockPaymentsApi {
    async fn daily_summary(&self) -> Result<DailySummary, ApiError> {
        self.record(PaymentsCall::DailySummary).await;
        self.summary.next_or(DailySummary::default)
    }

    async fn list_payments(&self) -> Result<Vec<Payment>, ApiError> {
        self.record(PaymentsCall::ListPayments).await;
        self.payments.next_or(Vec::new)
    }

    async fn merchant_qr(&self) -> Result<String, ApiError> {
        self.record(PaymentsCall::MerchantQr).await;
        self.qr.next_or(|| "data:image/png;base64,AAAA".to_string())
    }

    async fn create_payment(&self, request: &CreatePaymentRequest) -> Result<Payment, ApiError> {
        self.record(PaymentsCall::CreatePayment(request.clone())).await;
        self.created.next_or(|| {
            let mut created = payment("PRF-TEST-0001", request.amount, PaymentStatus::Initiated);
            created.purpose = Some(request.purpose.clone());
            created
        })
    }

    async fn confirm_payment(&self, reference: &str) -> Result<ConfirmPaymentResponse, ApiError> {
        self.record(PaymentsCall::ConfirmPayment {
            reference: reference.to_string(),
        })
        .await;
        self.confirmed.next_or(|| ConfirmPaymentResponse {
            success: true,
            receipt: Some(ReceiptRef {
                receipt_id: "RCP-TEST-0001".to_string(),
            }),
            error: None,
        })
    }
}

// =============================================================================
// Mock Receipts API
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceiptsCall {
    ReceiptById { receipt_id: String },
    UniversalSearch(ReceiptSearchParams),
    WhatsAppLink { receipt_id: String },
}

/// A receipt for fixtures
pub fn receipt(receipt_id: &str, merchant_name: &str, payment: Payment) -> Receipt {
    Receipt {
        receipt_id: receipt_id.to_string(),
        merchant: ReceiptMerchant {
            name: merchant_name.to_string(),
            phone: None,
        },
        payment,
    }
}

#[derive(Default)]
pub struct MockReceiptsApi {
    by_id: Replies<Receipt>,
    search: Replies<ReceiptSearchResponse>,
    whatsapp: Replies<String>,
    calls: Arc<Mutex<Vec<ReceiptsCall>>>,
}

impl MockReceiptsApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_receipt(self, receipt: Receipt) -> Self {
        self.by_id.push(Ok(receipt));
        self
    }

    pub fn with_receipt_error(self, error: ApiError) -> Self {
        self.by_id.push(Err(error));
        self
    }

    pub fn with_search_hit(self, receipt: Receipt) -> Self {
        self.search.push(Ok(ReceiptSearchResponse {
            success: true,
            receipt: Some(receipt),
        }));
        self
    }

    pub fn with_search_miss(self) -> Self {
        self.search.push(Ok(ReceiptSearchResponse {
            success: false,
            receipt: None,
        }));
        self
    }

    pub fn with_search_error(self, error: ApiError) -> Self {
        self.search.push(Err(error));
        self
    }

    pub fn with_whatsapp_link(self, url: &str) -> Self {
        self.whatsapp.push(Ok(url.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<ReceiptsCall> {
        lock(&self.calls).clone()
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl BaseReceiptsApi for MockReceiptsApi {
    async fn receipt_by_id(&self, receipt_id: &str) -> Result<Receipt, ApiError> {
        lock(&self.calls).push(ReceiptsCall::ReceiptById {
            receipt_id: receipt_id.to_string(),
        });
        match lock(&self.by_id.0).pop_front() {
            Some(reply) => reply,
            None => Err(rejected(404, "Receipt not found")),
        }
    }

    async fn universal_search(
        &self,
        params: &ReceiptSearchParams,
    ) -> Result<ReceiptSearchResponse, ApiError> {
        lock(&self.calls).push(ReceiptsCall::UniversalSearch(params.clone()));
        self.search.next_or(ReceiptSearchResponse::default)
    }

    async fn whatsapp_link(&self, receipt_id: &str) -> Result<String, ApiError> {
        lock(&self.calls).push(ReceiptsCall::WhatsAppLink {
            receipt_id: receipt_id.to_string(),
        });
        self.whatsapp
            .next_or(|| format!("https://wa.me/?text=Receipt%20{receipt_id}"))
    }
}

// =============================================================================
// Mock Profile API
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileCall {
    GetProfile,
    UpdateProfile(ProfileUpdate),
    AddBank(BankAccount),
}

#[derive(Default)]
pub struct MockProfileApi {
    profile: Replies<MerchantProfile>,
    update: Replies<()>,
    add_bank: Replies<()>,
    calls: Arc<Mutex<Vec<ProfileCall>>>,
}

impl MockProfileApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(self, profile: MerchantProfile) -> Self {
        self.profile.push(Ok(profile));
        self
    }

    pub fn with_profile_error(self, error: ApiError) -> Self {
        self.profile.push(Err(error));
        self
    }

    pub fn with_update_error(self, error: ApiError) -> Self {
        self.update.push(Err(error));
        self
    }

    pub fn with_add_bank_error(self, error: ApiError) -> Self {
        self.add_bank.push(Err(error));
        self
    }

    pub fn calls(&self) -> Vec<ProfileCall> {
        lock(&self.calls).clone()
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl BaseProfileApi for MockProfileApi {
    async fn get_profile(&self) -> Result<MerchantProfile, ApiError> {
        lock(&self.calls).push(ProfileCall::GetProfile);
        self.profile.next_or(MerchantProfile::default)
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<(), ApiError> {
        lock(&self.calls).push(ProfileCall::UpdateProfile(update.clone()));
        self.update.next_or(|| ())
    }

    async fn add_bank(&self, bank: &BankAccount) -> Result<(), ApiError> {
        lock(&self.calls).push(ProfileCall::AddBank(bank.clone()));
        self.add_bank.next_or(|| ())
    }
}
