//! Client for the Proof Platform REST API.
//!
//! Auth and payment endpoints attach the merchant's bearer token when one is
//! set; receipt endpoints are public and never send it.

mod auth;
mod error;
pub mod models;
mod payments;
mod receipts;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

pub use error::ApiError;
pub use models::*;

pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";

/// HTTP client for the Proof API
#[derive(Debug, Clone)]
pub struct ProofClient {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl ProofClient {
    /// Create a new client rooted at `base_url` (e.g. `http://localhost:3001/api`)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_token: None,
        }
    }

    /// Create a client with authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.auth_token = token;
    }

    pub fn token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    pub(crate) async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let req = self.authorize(self.client.get(self.url(path)));
        self.execute(req).await
    }

    /// GET without the bearer token
    pub(crate) async fn get_public<Q, R>(&self, path: &str, query: Option<&Q>) -> Result<R, ApiError>
    where
        Q: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let mut req = self.client.get(self.url(path));
        if let Some(query) = query {
            req = req.query(query);
        }
        self.execute(req).await
    }

    pub(crate) async fn post<B, R>(&self, path: &str, body: Option<&B>) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let mut req = self.authorize(self.client.post(self.url(path)));
        if let Some(body) = body {
            req = req.json(body);
        }
        self.execute(req).await
    }

    pub(crate) async fn put<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let req = self.authorize(self.client.put(self.url(path))).json(body);
        self.execute(req).await
    }

    /// Send a request and decode the JSON body, or the `{ error }` body on failure
    async fn execute<R: DeserializeOwned>(&self, req: RequestBuilder) -> Result<R, ApiError> {
        let response = req.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            debug!(status = status.as_u16(), "Proof API returned an error");
            return Err(ApiError::rejected(status.as_u16(), &body));
        }

        // 204s and empty 200s decode as an empty object
        let body = if body.trim().is_empty() { "{}" } else { body.as_str() };
        Ok(serde_json::from_str(body)?)
    }
}

/// Body type for requests that send nothing
pub(crate) type NoBody = serde_json::Value;

/// Response type for endpoints whose body carries nothing we read
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_double_slashes() {
        let client = ProofClient::new("http://localhost:3001/api/");
        assert_eq!(client.base_url(), "http://localhost:3001/api");
        assert_eq!(
            client.url("/auth/request-otp"),
            "http://localhost:3001/api/auth/request-otp"
        );
        assert_eq!(client.url("payments"), "http://localhost:3001/api/payments");
    }

    #[test]
    fn token_is_optional() {
        let client = ProofClient::new(DEFAULT_API_URL);
        assert_eq!(client.token(), None);

        let mut client = client.with_token("t1");
        assert_eq!(client.token(), Some("t1"));

        client.set_token(None);
        assert_eq!(client.token(), None);
    }
}
