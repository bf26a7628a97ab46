//! Mapping relay errors onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use motive_core::RelayError;
use serde_json::json;
use tracing::{error, warn};

/// Handler error: a status code plus the message sent as `{"detail": ...}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        let status = match &err {
            RelayError::BackendReported(_) => StatusCode::BAD_REQUEST,
            RelayError::Unsupported(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!(error = %err, "Relay failed");
        } else {
            warn!(error = %err, "Request rejected");
        }

        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let reported: ApiError = RelayError::BackendReported("bad input".into()).into();
        assert_eq!(reported.status, StatusCode::BAD_REQUEST);
        assert_eq!(reported.message, "bad input");

        let status: ApiError = RelayError::BackendStatus {
            status: 502,
            body: String::new(),
        }
        .into();
        assert_eq!(status.status, StatusCode::INTERNAL_SERVER_ERROR);

        let malformed: ApiError = RelayError::malformed("missing 'sentences'").into();
        assert_eq!(malformed.status, StatusCode::INTERNAL_SERVER_ERROR);

        let unsupported: ApiError = RelayError::Unsupported("no".into()).into();
        assert_eq!(unsupported.status, StatusCode::NOT_FOUND);
    }
}
