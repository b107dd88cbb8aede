//! `/receipts` endpoints (public, no token)

use crate::models::{
    Receipt, ReceiptResponse, ReceiptSearchParams, ReceiptSearchResponse, WhatsAppLinkResponse,
};
use crate::{ApiError, NoBody, ProofClient};

impl ProofClient {
    pub async fn receipt_by_id(&self, receipt_id: &str) -> Result<Receipt, ApiError> {
        let response: ReceiptResponse = self
            .get_public::<NoBody, _>(&format!("/receipts/{}", receipt_id), None)
            .await?;
        Ok(response.receipt)
    }

    /// Search by id, phone number, or amount + date
    pub async fn universal_search(
        &self,
        params: &ReceiptSearchParams,
    ) -> Result<ReceiptSearchResponse, ApiError> {
        self.get_public("/receipts/search", Some(params)).await
    }

    pub async fn whatsapp_link(&self, receipt_id: &str) -> Result<String, ApiError> {
        let response: WhatsAppLinkResponse = self
            .get_public::<NoBody, _>(&format!("/receipts/{}/whatsapp", receipt_id), None)
            .await?;
        Ok(response.whatsapp_url)
    }
}
