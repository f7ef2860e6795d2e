//! HTTP client for the bora auth server.
//!
//! Thin wrapper over `reqwest` exposing one method per endpoint. The
//! methods consumed by the session bootstrapper live behind the [`AuthApi`]
//! trait; screen-level flows (registration, password reset, e-mail OTP) are
//! inherent methods.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize};
use tracing::debug;

use crate::models::UserProfile;

use super::{ApiError, AuthApi, LoginOutcome, LoginRequest};

// ============================================================================
// Constants
// ============================================================================

/// Hard per-request timeout in seconds.
/// A hung request must never block the session state machine; timing out is
/// treated like any other network failure at that step.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// API client for the auth server.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct AuthClient {
    client: Client,
    base_url: String,
}

impl AuthClient {
    /// Create a new client against `base_url` (e.g. `https://api.boraapp.app`).
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check if response is successful, mapping non-2xx bodies to `Rejected`.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    /// Parse a 2xx body, mapping bad JSON to `Malformed` rather than a
    /// transport error.
    async fn parse_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ApiError::Malformed(e.to_string()))
    }

    async fn post_for_message(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<String, ApiError> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        let response = Self::check_response(response).await?;
        let parsed: MessageResponse = Self::parse_json(response).await?;
        Ok(parsed.message)
    }

    // ===== Screen-level flows (not used by the bootstrapper) =====

    /// Create a password account. The server mails an OTP; the account is
    /// usable after `verify_email`.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<String, ApiError> {
        let body = serde_json::json!({
            "name": name,
            "email": email,
            "password": password,
            "providerType": "credentials",
        });
        self.post_for_message("/auth/register", &body).await
    }

    pub async fn forgot_password(&self, email: &str) -> Result<String, ApiError> {
        let body = serde_json::json!({ "email": email });
        self.post_for_message("/auth/forgot-password", &body).await
    }

    pub async fn verify_password_code(&self, email: &str, code: &str) -> Result<String, ApiError> {
        let body = serde_json::json!({ "email": email, "code": code });
        self.post_for_message("/auth/verify-password-code", &body).await
    }

    pub async fn reset_password(
        &self,
        reset_token: &str,
        password: &str,
    ) -> Result<String, ApiError> {
        let body = serde_json::json!({ "password": password });
        self.post_for_message(&format!("/auth/reset-password/{reset_token}"), &body)
            .await
    }

    pub async fn verify_email(&self, email: &str, otp: &str) -> Result<String, ApiError> {
        let body = serde_json::json!({ "email": email, "otp": otp });
        self.post_for_message("/auth/verify-email", &body).await
    }

    pub async fn resend_otp(&self, email: &str) -> Result<String, ApiError> {
        let body = serde_json::json!({ "email": email });
        self.post_for_message("/auth/resend-otp", &body).await
    }
}

#[async_trait]
impl AuthApi for AuthClient {
    async fn verify_access_token(&self, access_token: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.url("/auth/verify-access-token"))
            .bearer_auth(access_token)
            .send()
            .await?;
        Self::check_response(response).await?;
        Ok(())
    }

    async fn refresh(&self, refresh_token: &str) -> Result<String, ApiError> {
        let body = serde_json::json!({ "refresh_token": refresh_token });
        let response = self
            .client
            .post(self.url("/auth/refresh"))
            .json(&body)
            .send()
            .await?;
        let response = Self::check_response(response).await?;
        let parsed: RefreshResponse = Self::parse_json(response).await?;
        let access_token = parsed
            .access_token
            .ok_or_else(|| ApiError::Malformed("refresh response missing access_token".into()))?;
        debug!("access token refreshed");
        Ok(access_token)
    }

    async fn get_user_data(&self, access_token: &str) -> Result<UserProfile, ApiError> {
        let response = self
            .client
            .get(self.url("/auth/get-user-data"))
            .bearer_auth(access_token)
            .send()
            .await?;
        let response = Self::check_response(response).await?;
        let parsed: UserEnvelope = Self::parse_json(response).await?;
        parsed
            .user
            .ok_or_else(|| ApiError::Malformed("user data response missing user".into()))
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginOutcome, ApiError> {
        let (path, body) = match request {
            LoginRequest::Password { email, password } => (
                "/auth/login",
                serde_json::json!({ "email": email, "password": password }),
            ),
            LoginRequest::Google { email, id_token } => (
                "/auth/googlee",
                serde_json::json!({
                    "email": email,
                    "token": id_token,
                    "providerType": "google",
                }),
            ),
        };

        let response = self.client.post(self.url(path)).json(&body).send().await?;
        let response = Self::check_response(response).await?;
        let parsed: LoginResponse = Self::parse_json(response).await?;
        parsed.into_outcome()
    }

    async fn set_biometric(
        &self,
        access_token: &str,
        user_id: &str,
        enabled: bool,
    ) -> Result<(), ApiError> {
        let body = serde_json::json!({ "biometric": enabled });
        let response = self
            .client
            .patch(self.url(&format!("/user/settings/{user_id}/biometric")))
            .bearer_auth(access_token)
            .json(&body)
            .send()
            .await?;
        Self::check_response(response).await?;
        Ok(())
    }
}

// Internal API response types for parsing

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserEnvelope {
    user: Option<UserProfile>,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
    user: Option<UserProfile>,
}

impl LoginResponse {
    fn into_outcome(self) -> Result<LoginOutcome, ApiError> {
        match (self.access_token, self.refresh_token, self.user) {
            (Some(access_token), Some(refresh_token), Some(user)) => Ok(LoginOutcome {
                access_token,
                refresh_token,
                user,
            }),
            _ => Err(ApiError::Malformed(
                "login response missing token pair or user".into(),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    #[serde(default)]
    message: String,
}
