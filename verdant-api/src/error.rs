use thiserror::Error;
use tracing::warn;

use verdant_core::ActionError;

/// Failure talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured base URL and an endpoint path do not form a URL.
    #[error("invalid endpoint `{path}`: {reason}")]
    Endpoint { path: String, reason: String },

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not have the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn is_malformed_response(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}

impl From<ApiError> for ActionError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Decode(source) => {
                warn!(?source, "backend response could not be decoded");
                ActionError::MalformedResponse(source.to_string())
            }
            other => ActionError::Remote(other.to_string()),
        }
    }
}
