//! Request and response payloads for the Proof API
//!
//! The API mixes conventions: auth and receipt payloads are camelCase,
//! profile and payment-list payloads are snake_case. Field renames below
//! follow what the server actually sends.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ============================================================================
// Auth
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct RequestOtpRequest<'a> {
    pub phone: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestOtpResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyOtpRequest<'a> {
    pub phone: &'a str,
    pub otp: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
}

/// Verification result. The two flags decide the next signup step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpResponse {
    #[serde(default)]
    pub requires_name: bool,
    #[serde(default)]
    pub requires_pin_setup: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PinRequest<'a> {
    pub phone: &'a str,
    pub pin: &'a str,
}

/// Merchant summary returned at login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Merchant {
    /// Numeric or string on the wire; kept as text
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(id)) => Some(id),
        Some(other) => Some(other.to_string()),
    })
}

impl Merchant {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            phone: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub merchant: Merchant,
}

// ============================================================================
// Profile
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BankAccount {
    #[serde(default)]
    pub bank_name: String,
    #[serde(default)]
    pub account_number: String,
    #[serde(default)]
    pub account_name: String,
    #[serde(default)]
    pub settlement_cycle: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MerchantProfile {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub business_category: Option<String>,
    #[serde(default)]
    pub cac_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub bvn: Option<String>,
    #[serde(default)]
    pub verification_level: Option<String>,
    #[serde(default)]
    pub banks: Vec<BankAccount>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileResponse {
    pub profile: MerchantProfile,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    pub address: String,
    pub bvn: String,
    pub business_category: String,
    pub cac_number: String,
}

// ============================================================================
// Payments
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Success,
    Pending,
    Initiated,
    Failed,
    #[serde(other)]
    Unknown,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Success => "success",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Initiated => "initiated",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Unknown => "unknown",
        }
    }
}

/// A payment as listed for the merchant or embedded in a receipt.
///
/// The list endpoint sends snake_case, the receipt endpoint camelCase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub reference: String,
    pub amount: f64,
    pub status: PaymentStatus,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default, alias = "customerPhone")]
    pub customer_phone: Option<String>,
    #[serde(default, alias = "customerName")]
    pub customer_name: Option<String>,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<String>,
    #[serde(default, alias = "receiptId")]
    pub receipt_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub amount: f64,
    pub purpose: String,
    pub customer_phone: Option<String>,
    pub customer_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePaymentResponse {
    pub payment: Payment,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReceiptRef {
    #[serde(rename = "receiptId")]
    pub receipt_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfirmPaymentResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub receipt: Option<ReceiptRef>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Today's totals for the merchant home page
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    #[serde(default)]
    pub total_collected: f64,
    #[serde(default)]
    pub successful_payments: u32,
    #[serde(default)]
    pub pending_payments: u32,
    #[serde(default)]
    pub net_amount: f64,
    #[serde(default)]
    pub fees: f64,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailySummaryResponse {
    #[serde(default)]
    pub summary: DailySummary,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentsResponse {
    #[serde(default)]
    pub payments: Vec<Payment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MerchantQrResponse {
    /// Image data URL
    #[serde(rename = "qrCode")]
    pub qr_code: String,
}

// ============================================================================
// Receipts
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReceiptMerchant {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Receipt {
    #[serde(rename = "receiptId")]
    pub receipt_id: String,
    pub merchant: ReceiptMerchant,
    pub payment: Payment,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReceiptResponse {
    pub receipt: Receipt,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReceiptSearchResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub receipt: Option<Receipt>,
}

/// Query for `/receipts/search`. Absent fields are left out of the URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReceiptSearchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WhatsAppLinkResponse {
    #[serde(rename = "whatsappUrl")]
    pub whatsapp_url: String,
}
