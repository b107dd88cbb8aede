//! `/payments` endpoints

use crate::models::{
    ConfirmPaymentResponse, CreatePaymentRequest, CreatePaymentResponse, DailySummary,
    DailySummaryResponse, MerchantQrResponse, Payment, PaymentsResponse,
};
use crate::{ApiError, NoBody, ProofClient};

impl ProofClient {
    /// Log a manual payment. The returned payment carries the reference to confirm.
    pub async fn create_payment(
        &self,
        request: &CreatePaymentRequest,
    ) -> Result<Payment, ApiError> {
        let response: CreatePaymentResponse =
            self.post("/payments/create", Some(request)).await?;
        Ok(response.payment)
    }

    pub async fn confirm_payment(
        &self,
        reference: &str,
    ) -> Result<ConfirmPaymentResponse, ApiError> {
        self.post::<NoBody, _>(&format!("/payments/{}/confirm", reference), None)
            .await
    }

    pub async fn daily_summary(&self) -> Result<DailySummary, ApiError> {
        let response: DailySummaryResponse = self.get("/payments/merchant/daily").await?;
        Ok(response.summary)
    }

    pub async fn list_payments(&self) -> Result<Vec<Payment>, ApiError> {
        let response: PaymentsResponse = self.get("/payments").await?;
        Ok(response.payments)
    }

    /// Merchant QR code as an image data URL
    pub async fn merchant_qr(&self) -> Result<String, ApiError> {
        let response: MerchantQrResponse = self.get("/payments/merchant/qr").await?;
        Ok(response.qr_code)
    }
}
