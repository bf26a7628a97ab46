//! Centralized error types for the relay.

use thiserror::Error;

/// Main error type for relay operations.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(#[from] reqwest::Error),

    #[error("Backend returned {status}: {body}")]
    BackendStatus { status: u16, body: String },

    /// The backend answered but flagged the input itself as invalid.
    #[error("{0}")]
    BackendReported(String),

    #[error("Malformed backend response: {0}")]
    MalformedResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not supported: {0}")]
    Unsupported(String),
}

/// Result type for relay operations.
pub type RelayResult<T> = Result<T, RelayError>;

impl RelayError {
    /// Create a malformed response error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True when the error originates from the client's input rather than
    /// from the relay or the backend being broken.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::BackendReported(_))
    }
}
