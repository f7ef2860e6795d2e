//! Auth server client and the trait seam the session bootstrapper consumes.

use async_trait::async_trait;

pub mod client;
pub mod error;

pub use client::AuthClient;
pub use error::ApiError;

use crate::models::UserProfile;

/// Credential material handed to a login endpoint.
#[derive(Debug, Clone)]
pub enum LoginRequest {
    /// Email + password against `POST /auth/login`.
    Password { email: String, password: String },
    /// Federated sign-in: the Google id token is exchanged for a local
    /// session via `POST /auth/googlee` (endpoint name as the server
    /// spells it).
    Google { email: String, id_token: String },
}

/// A freshly minted session as returned by the login endpoints.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserProfile,
}

/// The subset of auth endpoints the session bootstrapper drives.
///
/// Every method maps a non-2xx or malformed response to an [`ApiError`];
/// nothing here panics on bad server data.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// `POST /auth/verify-access-token`. Ok means the token is still valid.
    async fn verify_access_token(&self, access_token: &str) -> Result<(), ApiError>;

    /// `POST /auth/refresh`. Returns the newly minted access token.
    async fn refresh(&self, refresh_token: &str) -> Result<String, ApiError>;

    /// `GET /auth/get-user-data`.
    async fn get_user_data(&self, access_token: &str) -> Result<UserProfile, ApiError>;

    /// `POST /auth/login` or `POST /auth/googlee`, depending on the request.
    async fn login(&self, request: &LoginRequest) -> Result<LoginOutcome, ApiError>;

    /// `PATCH /user/settings/{id}/biometric`.
    async fn set_biometric(
        &self,
        access_token: &str,
        user_id: &str,
        enabled: bool,
    ) -> Result<(), ApiError>;
}
