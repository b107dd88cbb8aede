//! Receipt search and the public receipt page

use proof_client::{PaymentStatus, Receipt, ReceiptSearchParams};
use tracing::{debug, warn};

use crate::notice::DisplayError;
use crate::traits::BaseReceiptsApi;

const EMPTY_QUERY: &str = "Please enter a search term or amount/date";
const NOT_FOUND: &str = "No receipt found matching your search";
const RECEIPT_NOT_FOUND: &str = "Receipt not found";

/// Search form: a free-text term, or an amount and a date together
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReceiptQuery {
    pub q: String,
    pub amount: String,
    pub date: String,
}

fn present(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl ReceiptQuery {
    pub fn to_params(&self) -> Result<ReceiptSearchParams, DisplayError> {
        let q = present(&self.q);
        let amount = present(&self.amount);
        let time = present(&self.date);

        if q.is_none() && (amount.is_none() || time.is_none()) {
            return Err(EMPTY_QUERY.into());
        }

        Ok(ReceiptSearchParams { q, amount, time })
    }
}

/// Path of the receipt page
pub fn receipt_path(receipt_id: &str) -> String {
    format!("/receipt/{receipt_id}")
}

/// Run a search; a hit yields the receipt id to navigate to.
pub async fn find_receipt(
    api: &dyn BaseReceiptsApi,
    query: &ReceiptQuery,
) -> Result<String, DisplayError> {
    let params = query.to_params()?;

    match api.universal_search(&params).await {
        Ok(response) => match response.receipt {
            Some(receipt) if response.success => Ok(receipt.receipt_id),
            _ => {
                debug!("Receipt search returned no match");
                Err(NOT_FOUND.into())
            }
        },
        Err(e) => {
            warn!("Receipt search failed: {}", e);
            Err(NOT_FOUND.into())
        }
    }
}

pub async fn load_receipt(api: &dyn BaseReceiptsApi, receipt_id: &str) -> Result<Receipt, DisplayError> {
    api.receipt_by_id(receipt_id).await.map_err(|e| {
        warn!(receipt_id, "Failed to load receipt: {}", e);
        DisplayError::new(e.user_message(RECEIPT_NOT_FOUND))
    })
}

/// WhatsApp share URL for a receipt
pub async fn share_link(api: &dyn BaseReceiptsApi, receipt_id: &str) -> Result<String, DisplayError> {
    api.whatsapp_link(receipt_id).await.map_err(|e| {
        warn!(receipt_id, "Failed to build share link: {}", e);
        DisplayError::new(e.user_message("Failed to generate share link"))
    })
}

/// Heading on the receipt page
pub fn status_heading(status: PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Success => "Verified Payment",
        other => other.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{payment, receipt, rejected, MockReceiptsApi, ReceiptsCall};

    fn query(q: &str, amount: &str, date: &str) -> ReceiptQuery {
        ReceiptQuery {
            q: q.to_string(),
            amount: amount.to_string(),
            date: date.to_string(),
        }
    }

    #[test]
    fn term_or_amount_and_date_is_required() {
        assert_eq!(query("", "", "").to_params().unwrap_err().to_string(), EMPTY_QUERY);
        assert!(query("", "500", "").to_params().is_err());
        assert!(query("  ", "", "2026-10-16").to_params().is_err());

        let params = query(" RCP-1 ", "", "").to_params().unwrap();
        assert_eq!(params.q.as_deref(), Some("RCP-1"));
        assert_eq!(params.amount, None);

        let params = query("", "500", "2026-10-16").to_params().unwrap();
        assert_eq!(params.q, None);
        assert_eq!(params.time.as_deref(), Some("2026-10-16"));
    }

    #[tokio::test]
    async fn hit_yields_receipt_id() {
        let api = MockReceiptsApi::new().with_search_hit(receipt(
            "RCP-7",
            "Acme",
            payment("PRF-7", 700.0, PaymentStatus::Success),
        ));

        let id = find_receipt(&api, &query("PRF-7", "", "")).await.unwrap();

        assert_eq!(id, "RCP-7");
        assert_eq!(receipt_path(&id), "/receipt/RCP-7");
    }

    #[tokio::test]
    async fn miss_and_failure_read_the_same() {
        let api = MockReceiptsApi::new()
            .with_search_miss()
            .with_search_error(rejected(500, "boom"));

        for _ in 0..2 {
            let err = find_receipt(&api, &query("nothing", "", "")).await.unwrap_err();
            assert_eq!(err.to_string(), NOT_FOUND);
        }
    }

    #[tokio::test]
    async fn invalid_query_sends_nothing() {
        let api = MockReceiptsApi::new();
        assert!(find_receipt(&api, &query("", "", "")).await.is_err());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn receipt_load_reports_server_reason() {
        let api = MockReceiptsApi::new().with_receipt_error(rejected(404, "Receipt RCP-0 does not exist"));
        let err = load_receipt(&api, "RCP-0").await.unwrap_err();
        assert_eq!(err.to_string(), "Receipt RCP-0 does not exist");
        assert_eq!(
            api.calls(),
            vec![ReceiptsCall::ReceiptById {
                receipt_id: "RCP-0".to_string()
            }]
        );
    }

    #[test]
    fn verified_heading_only_for_success() {
        assert_eq!(status_heading(PaymentStatus::Success), "Verified Payment");
        assert_eq!(status_heading(PaymentStatus::Pending), "pending");
    }
}
