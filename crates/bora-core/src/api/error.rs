use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Request could not complete: connectivity, TLS, or the hard
    /// per-request timeout. Treated like a rejected response by the
    /// bootstrapper's state machine.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Server answered non-2xx. The message is the server's structured
    /// `{message}` body, suitable for showing to the user verbatim.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// 2xx response missing expected fields or not valid JSON.
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Failure body shape shared by every auth endpoint.
#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl ApiError {
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .map(|b| b.message)
            .unwrap_or_else(|_| format!("request failed with status {status}"));
        ApiError::Rejected {
            status: status.as_u16(),
            message,
        }
    }
}
