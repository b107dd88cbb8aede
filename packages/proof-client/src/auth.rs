//! `/auth` endpoints

use crate::models::{
    BankAccount, LoginResponse, MerchantProfile, PinRequest, ProfileResponse, ProfileUpdate,
    RequestOtpRequest, RequestOtpResponse, VerifyOtpRequest, VerifyOtpResponse,
};
use crate::{Ack, ApiError, ProofClient};

impl ProofClient {
    /// Ask the API to text a one-time code to `phone`
    pub async fn request_otp(&self, phone: &str) -> Result<RequestOtpResponse, ApiError> {
        self.post("/auth/request-otp", Some(&RequestOtpRequest { phone }))
            .await
    }

    /// Check a one-time code. `name` is sent only once the server has asked for it.
    pub async fn verify_otp(
        &self,
        phone: &str,
        otp: &str,
        name: Option<&str>,
    ) -> Result<VerifyOtpResponse, ApiError> {
        self.post("/auth/verify-otp", Some(&VerifyOtpRequest { phone, otp, name }))
            .await
    }

    pub async fn set_pin(&self, phone: &str, pin: &str) -> Result<Ack, ApiError> {
        self.post("/auth/set-pin", Some(&PinRequest { phone, pin }))
            .await
    }

    pub async fn login(&self, phone: &str, pin: &str) -> Result<LoginResponse, ApiError> {
        self.post("/auth/login", Some(&PinRequest { phone, pin })).await
    }

    pub async fn get_profile(&self) -> Result<MerchantProfile, ApiError> {
        let response: ProfileResponse = self.get("/auth/profile").await?;
        Ok(response.profile)
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Ack, ApiError> {
        self.put("/auth/profile", update).await
    }

    /// Link a settlement bank account
    pub async fn add_bank(&self, bank: &BankAccount) -> Result<Ack, ApiError> {
        self.post("/auth/banks", Some(bank)).await
    }
}
