use serde::Deserialize;

/// Error type for Proof API calls.
///
/// The variants exist for logging. Screens never branch on them: every
/// failure is shown through [`ApiError::user_message`].
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API rejected request ({status}): {}", .message.as_deref().unwrap_or("no reason given"))]
    Rejected { status: u16, message: Option<String> },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Error body returned by the API on non-2xx responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl ApiError {
    /// Build a rejection from a non-2xx status and its raw body.
    ///
    /// Bodies that are not `{ "error": "..." }` yield a rejection without a message.
    pub fn rejected(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.trim().is_empty());

        ApiError::Rejected { status, message }
    }

    /// The server-supplied reason, if the server gave one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { message, .. } => message.as_deref(),
            ApiError::Network(_) | ApiError::Decode(_) => None,
        }
    }

    /// Collapse any failure into the string shown to the merchant.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }

    /// HTTP status of a rejection
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            ApiError::Decode(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_reads_error_field() {
        let err = ApiError::rejected(400, r#"{"error":"Invalid OTP"}"#);
        assert_eq!(err.server_message(), Some("Invalid OTP"));
        assert_eq!(err.user_message("Failed to verify OTP"), "Invalid OTP");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn rejected_without_error_field_uses_fallback() {
        let err = ApiError::rejected(500, r#"{"message":"boom"}"#);
        assert_eq!(err.server_message(), None);
        assert_eq!(err.user_message("Failed to send OTP"), "Failed to send OTP");
    }

    #[test]
    fn non_json_body_uses_fallback() {
        let err = ApiError::rejected(502, "<html>Bad Gateway</html>");
        assert_eq!(err.user_message("Failed to set PIN"), "Failed to set PIN");
    }

    #[test]
    fn blank_error_field_uses_fallback() {
        let err = ApiError::rejected(400, r#"{"error":"  "}"#);
        assert_eq!(err.user_message("Login failed"), "Login failed");
    }

    #[test]
    fn decode_errors_use_fallback() {
        let err: ApiError = serde_json::from_str::<ErrorBody>("not json")
            .unwrap_err()
            .into();
        assert_eq!(err.user_message("Receipt not found"), "Receipt not found");
        assert!(err.to_string().starts_with("Failed to decode response"));
    }
}
