use reqwest::StatusCode;
use thiserror::Error;

/// Failures at the option-chain fetch boundary
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request error: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Request timed out")]
    Timeout,

    #[error("HTTP {status}: {preview}")]
    Status { status: StatusCode, preview: String },

    #[error("Non-JSON response: {0}")]
    NonJsonResponse(String),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Request(err)
        }
    }
}
