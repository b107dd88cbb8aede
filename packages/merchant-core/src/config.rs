use anyhow::{bail, Result};

use proof_client::DEFAULT_API_URL;

/// Dashboard configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the Proof API, e.g. `http://localhost:3001/api`
    pub api_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenvy::dotenv();

        Self::from_api_url(std::env::var("PROOF_API_URL").ok())
    }

    /// Configuration baked in at compile time (browser builds have no environment)
    pub fn from_build_env() -> Result<Self> {
        Self::from_api_url(option_env!("PROOF_API_URL").map(str::to_string))
    }

    fn from_api_url(api_url: Option<String>) -> Result<Self> {
        let api_url = match api_url {
            Some(url) if !url.trim().is_empty() => url.trim().trim_end_matches('/').to_string(),
            _ => return Ok(Self::default()),
        };

        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            bail!("PROOF_API_URL must be an http(s) URL, got {api_url:?}");
        }

        Ok(Self { api_url })
    }

    /// Unauthenticated client for this configuration
    pub fn client(&self) -> proof_client::ProofClient {
        proof_client::ProofClient::new(self.api_url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_url_uses_default() {
        assert_eq!(Config::from_api_url(None).unwrap(), Config::default());
        assert_eq!(
            Config::from_api_url(Some("  ".to_string())).unwrap().api_url,
            "http://localhost:3001/api"
        );
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = Config::from_api_url(Some("https://api.proof.ng/api/".to_string())).unwrap();
        assert_eq!(config.api_url, "https://api.proof.ng/api");
        assert_eq!(config.client().base_url(), "https://api.proof.ng/api");
    }

    #[test]
    fn non_http_url_is_an_error() {
        let err = Config::from_api_url(Some("localhost:3001".to_string())).unwrap_err();
        assert!(err.to_string().contains("PROOF_API_URL"));
    }
}
