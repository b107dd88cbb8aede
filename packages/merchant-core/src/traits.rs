// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Flows and forms take them as `Arc<dyn ...>` so tests can swap in the mocks
// from `crate::testing`.
//
// Naming convention: Base* for trait names (e.g., BaseAuthApi, BasePaymentsApi)
//
// Browser futures are not Send, so the wasm build drops the Send bound.

use async_trait::async_trait;
use proof_client::{
    ApiError, BankAccount, ConfirmPaymentResponse, CreatePaymentRequest, DailySummary,
    LoginResponse, MerchantProfile, Payment, ProfileUpdate, ProofClient, Receipt,
    ReceiptSearchParams, ReceiptSearchResponse, RequestOtpResponse, VerifyOtpResponse,
};

// =============================================================================
// Auth (OTP, PIN, login)
// =============================================================================

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait BaseAuthApi {
    /// Send a one-time code to the phone number
    async fn request_otp(&self, phone: &str) -> Result<RequestOtpResponse, ApiError>;

    /// Check the code; the response flags say which signup step comes next
    async fn verify_otp(
        &self,
        phone: &str,
        otp: &str,
        name: Option<&str>,
    ) -> Result<VerifyOtpResponse, ApiError>;

    async fn set_pin(&self, phone: &str, pin: &str) -> Result<(), ApiError>;

    async fn login(&self, phone: &str, pin: &str) -> Result<LoginResponse, ApiError>;
}

// =============================================================================
// Payments
// =============================================================================

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait BasePaymentsApi {
    async fn daily_summary(&self) -> Result<DailySummary, ApiError>;

    async fn list_payments(&self) -> Result<Vec<Payment>, ApiError>;

    /// Merchant QR code as an image data URL
    async fn merchant_qr(&self) -> Result<String, ApiError>;

    async fn create_payment(&self, request: &CreatePaymentRequest) -> Result<Payment, ApiError>;

    async fn confirm_payment(&self, reference: &str) -> Result<ConfirmPaymentResponse, ApiError>;
}

// =============================================================================
// Receipts (public)
// =============================================================================

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait BaseReceiptsApi {
    async fn receipt_by_id(&self, receipt_id: &str) -> Result<Receipt, ApiError>;

    async fn universal_search(
        &self,
        params: &ReceiptSearchParams,
    ) -> Result<ReceiptSearchResponse, ApiError>;

    async fn whatsapp_link(&self, receipt_id: &str) -> Result<String, ApiError>;
}

// =============================================================================
// Profile and settlement accounts
// =============================================================================

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait BaseProfileApi {
    async fn get_profile(&self) -> Result<MerchantProfile, ApiError>;

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<(), ApiError>;

    async fn add_bank(&self, bank: &BankAccount) -> Result<(), ApiError>;
}

// =============================================================================
// ProofClient implementations
// =============================================================================

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl BaseAuthApi for ProofClient {
    async fn request_otp(&self, phone: &str) -> Result<RequestOtpResponse, ApiError> {
        ProofClient::request_otp(self, phone).await
    }

    async fn verify_otp(
        &self,
        phone: &str,
        otp: &str,
        name: Option<&str>,
    ) -> Result<VerifyOtpResponse, ApiError> {
        ProofClient::verify_otp(self, phone, otp, name).await
    }

    async fn set_pin(&self, phone: &str, pin: &str) -> Result<(), ApiError> {
        ProofClient::set_pin(self, phone, pin).await.map(|_| ())
    }

    async fn login(&self, phone: &str, pin: &str) -> Result<LoginResponse, ApiError> {
        ProofClient::login(self, phone, pin).await
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl BasePaymentsApi for ProofClient {
    async fn daily_summary(&self) -> Result<DailySummary, ApiError> {
        ProofClient::daily_summary(self).await
    }

    async fn list_payments(&self) -> Result<Vec<Payment>, ApiError> {
        ProofClient::list_payments(self).await
    }

    async fn merchant_qr(&self) -> Result<String, ApiError> {
        ProofClient::merchant_qr(self).await
    }

    async fn create_payment(&self, request: &CreatePaymentRequest) -> Result<Payment, ApiError> {
        ProofClient::create_payment(self, request).await
    }

    async fn confirm_payment(&self, reference: &str) -> Result<ConfirmPaymentResponse, ApiError> {
        ProofClient::confirm_payment(self, reference).await
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl BaseReceiptsApi for ProofClient {
    async fn receipt_by_id(&self, receipt_id: &str) -> Result<Receipt, ApiError> {
        ProofClient::receipt_by_id(self, receipt_id).await
    }

    async fn universal_search(
        &self,
        params: &ReceiptSearchParams,
    ) -> Result<ReceiptSearchResponse, ApiError> {
        ProofClient::universal_search(self, params).await
    }

    async fn whatsapp_link(&self, receipt_id: &str) -> Result<String, ApiError> {
        ProofClient::whatsapp_link(self, receipt_id).await
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl BaseProfileApi for ProofClient {
    async fn get_profile(&self) -> Result<MerchantProfile, ApiError> {
        ProofClient::get_profile(self).await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<(), ApiError> {
        ProofClient::update_profile(self, update).await.map(|_| ())
    }

    async fn add_bank(&self, bank: &BankAccount) -> Result<(), ApiError> {
        ProofClient::add_bank(self, bank).await.map(|_| ())
    }
}
