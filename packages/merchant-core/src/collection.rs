//! Collecting payments: the merchant QR code and manual entry

use std::sync::Arc;

use proof_client::CreatePaymentRequest;
use tracing::{info, warn};

use crate::busy::BusyFlag;
use crate::notice::DisplayError;
use crate::traits::BasePaymentsApi;

const QR_FAILED: &str = "Failed to load QR code";
const PAYMENT_FAILED: &str = "Payment failed";
const PROCESSING_FAILED: &str = "Payment processing failed";
pub const PAYMENT_SUCCESSFUL: &str = "Payment successful!";

/// What the payment is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum PaymentPurpose {
    #[default]
    TransportFare,
    MarketLevy,
    GoodsPurchase,
    ServicePayment,
    CooperativeDues,
}

impl PaymentPurpose {
    pub const ALL: [PaymentPurpose; 5] = [
        PaymentPurpose::TransportFare,
        PaymentPurpose::MarketLevy,
        PaymentPurpose::GoodsPurchase,
        PaymentPurpose::ServicePayment,
        PaymentPurpose::CooperativeDues,
    ];

    /// Wire value
    pub fn value(&self) -> &'static str {
        match self {
            PaymentPurpose::TransportFare => "transport_fare",
            PaymentPurpose::MarketLevy => "market_levy",
            PaymentPurpose::GoodsPurchase => "goods_purchase",
            PaymentPurpose::ServicePayment => "service_payment",
            PaymentPurpose::CooperativeDues => "cooperative_dues",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentPurpose::TransportFare => "Transport Fare",
            PaymentPurpose::MarketLevy => "Market Levy",
            PaymentPurpose::GoodsPurchase => "Goods Purchase",
            PaymentPurpose::ServicePayment => "Service Payment",
            PaymentPurpose::CooperativeDues => "Cooperative Dues",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            PaymentPurpose::TransportFare => "🚕",
            PaymentPurpose::MarketLevy => "🏪",
            PaymentPurpose::GoodsPurchase => "🛍️",
            PaymentPurpose::ServicePayment => "🛠️",
            PaymentPurpose::CooperativeDues => "🤝",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.value() == value)
    }
}

/// Manual collection form fields as typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualPayment {
    pub amount: String,
    pub purpose: PaymentPurpose,
    pub customer_phone: String,
    pub customer_name: String,
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl ManualPayment {
    /// Build the create-payment body. The amount must be a positive number.
    pub fn to_request(&self) -> Result<CreatePaymentRequest, DisplayError> {
        let amount = self
            .amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|a| a.is_finite() && *a > 0.0)
            .ok_or_else(|| DisplayError::from("Please enter a valid amount"))?;

        Ok(CreatePaymentRequest {
            amount,
            purpose: self.purpose.value().to_string(),
            customer_phone: optional(&self.customer_phone),
            customer_name: optional(&self.customer_name),
        })
    }
}

/// How a manual collection ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Collection {
    /// A collection is already in progress; nothing was sent
    Busy,
    /// The form did not validate; nothing was sent
    Rejected(String),
    Failed(String),
    /// Confirmed; the UI navigates to the receipt
    Received { receipt_id: String },
}

/// Runs create-then-confirm for manual payments
pub struct Collector {
    api: Arc<dyn BasePaymentsApi>,
    busy: BusyFlag,
}

impl Collector {
    pub fn new(api: Arc<dyn BasePaymentsApi>) -> Self {
        Self {
            api,
            busy: BusyFlag::new(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.busy.is_busy()
    }

    /// The merchant's QR code as an image data URL
    pub async fn load_qr(&self) -> Result<String, DisplayError> {
        self.api.merchant_qr().await.map_err(|e| {
            warn!("Failed to load merchant QR: {}", e);
            DisplayError::from(QR_FAILED)
        })
    }

    pub async fn collect(&self, form: &ManualPayment) -> Collection {
        let Some(_guard) = self.busy.try_begin() else {
            return Collection::Busy;
        };

        let request = match form.to_request() {
            Ok(request) => request,
            Err(e) => return Collection::Rejected(e.0),
        };

        let payment = match self.api.create_payment(&request).await {
            Ok(payment) => payment,
            Err(e) => {
                warn!("create-payment failed: {}", e);
                return Collection::Failed(e.user_message(PROCESSING_FAILED));
            }
        };

        match self.api.confirm_payment(&payment.reference).await {
            Ok(confirmed) => match (confirmed.success, confirmed.receipt) {
                (true, Some(receipt)) => {
                    info!(reference = %payment.reference, receipt_id = %receipt.receipt_id, "Payment confirmed");
                    Collection::Received {
                        receipt_id: receipt.receipt_id,
                    }
                }
                _ => {
                    let message = confirmed
                        .error
                        .filter(|m| !m.trim().is_empty())
                        .unwrap_or_else(|| PAYMENT_FAILED.to_string());
                    warn!(reference = %payment.reference, "Payment not confirmed: {}", message);
                    Collection::Failed(message)
                }
            },
            Err(e) => {
                warn!(reference = %payment.reference, "confirm-payment failed: {}", e);
                Collection::Failed(e.user_message(PROCESSING_FAILED))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{rejected, rejected_without_message, MockPaymentsApi, PaymentsCall};

    fn form(amount: &str) -> ManualPayment {
        ManualPayment {
            amount: amount.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn purposes_round_trip_through_wire_values() {
        for purpose in PaymentPurpose::ALL {
            assert_eq!(PaymentPurpose::from_value(purpose.value()), Some(purpose));
        }
        assert_eq!(PaymentPurpose::default().value(), "transport_fare");
        assert_eq!(PaymentPurpose::from_value("bribe"), None);
    }

    #[test]
    fn request_needs_positive_amount_and_nulls_blanks() {
        assert!(form("").to_request().is_err());
        assert!(form("0").to_request().is_err());
        assert!(form("-5").to_request().is_err());
        assert!(form("abc").to_request().is_err());

        let mut manual = form(" 1500.50 ");
        manual.customer_phone = "  ".to_string();
        manual.customer_name = " Ada ".to_string();
        manual.purpose = PaymentPurpose::MarketLevy;

        let request = manual.to_request().unwrap();
        assert_eq!(request.amount, 1500.5);
        assert_eq!(request.purpose, "market_levy");
        assert_eq!(request.customer_phone, None);
        assert_eq!(request.customer_name.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn confirmed_payment_yields_receipt() {
        let api = Arc::new(MockPaymentsApi::new().with_confirmed("RCP-9"));
        let collector = Collector::new(api.clone());

        let result = collector.collect(&form("200")).await;

        assert_eq!(
            result,
            Collection::Received {
                receipt_id: "RCP-9".to_string()
            }
        );
        let calls = api.calls();
        assert_eq!(calls.len(), 2);
        assert!(matches!(&calls[0], PaymentsCall::CreatePayment(r) if r.amount == 200.0));
        assert!(
            matches!(&calls[1], PaymentsCall::ConfirmPayment { reference } if reference == "PRF-TEST-0001")
        );
    }

    #[tokio::test]
    async fn declined_confirmation_shows_reason_or_fallback() {
        let api = Arc::new(
            MockPaymentsApi::new()
                .with_declined(Some("Insufficient funds"))
                .with_declined(None),
        );
        let collector = Collector::new(api);

        assert_eq!(
            collector.collect(&form("200")).await,
            Collection::Failed("Insufficient funds".to_string())
        );
        assert_eq!(
            collector.collect(&form("200")).await,
            Collection::Failed(PAYMENT_FAILED.to_string())
        );
    }

    #[tokio::test]
    async fn transport_failures_fall_back() {
        let api = Arc::new(
            MockPaymentsApi::new()
                .with_create_error(rejected_without_message(502))
                .with_confirm_error(rejected(400, "Payment already confirmed")),
        );
        let collector = Collector::new(api.clone());

        assert_eq!(
            collector.collect(&form("200")).await,
            Collection::Failed(PROCESSING_FAILED.to_string())
        );
        assert_eq!(
            collector.collect(&form("200")).await,
            Collection::Failed("Payment already confirmed".to_string())
        );
    }

    #[tokio::test]
    async fn invalid_form_sends_nothing() {
        let api = Arc::new(MockPaymentsApi::new());
        let collector = Collector::new(api.clone());

        assert!(matches!(collector.collect(&form("")).await, Collection::Rejected(_)));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn qr_failure_has_fixed_message() {
        let collector = Collector::new(Arc::new(
            MockPaymentsApi::new().with_qr_error(rejected(401, "Unauthorized")),
        ));
        assert_eq!(collector.load_qr().await.unwrap_err().to_string(), QR_FAILED);
    }

    #[tokio::test]
    async fn second_collect_while_outstanding_is_busy() {
        let api = Arc::new(MockPaymentsApi::new());
        let collector = Collector::new(api.clone());
        let release = api.hold_next_call();
        let manual = form("50");

        let (first, second) = tokio::join!(collector.collect(&manual), async {
            tokio::task::yield_now().await;
            let second = collector.collect(&manual).await;
            let _ = release.send(());
            second
        });

        assert_eq!(second, Collection::Busy);
        assert!(matches!(first, Collection::Received { .. }));
    }
}
