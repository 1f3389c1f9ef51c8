use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{error, warn};

use crate::types::CodeweaveError;

pub const MESSAGES_REQUIRED: &str = "Messages array is required";
pub const INVALID_JSON: &str = "Invalid JSON body";
pub const PROVIDER_FAILED: &str = "Failed to get response from model";
pub const UNEXPECTED_FORMAT: &str = "Unexpected response format";

/// Failure modes of the HTTP handlers, rendered as `{"error": "..."}`
#[derive(Debug)]
pub enum ApiError {
    /// Malformed request; the message is returned verbatim
    BadRequest(String),
    /// The provider call failed; details are logged, not returned
    Upstream(CodeweaveError),
    /// The provider answered with a non-text reply of this kind
    NonTextReply(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) | ApiError::NonTextReply(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn public_message(&self) -> &str {
        match self {
            ApiError::BadRequest(message) => message,
            ApiError::Upstream(_) => PROVIDER_FAILED,
            ApiError::NonTextReply(_) => UNEXPECTED_FORMAT,
        }
    }
}

impl From<CodeweaveError> for ApiError {
    fn from(err: CodeweaveError) -> Self {
        ApiError::Upstream(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::BadRequest(message) => warn!("Rejected request: {}", message),
            ApiError::Upstream(err) => match err.category() {
                Some(category) => error!(%category, "Provider call failed: {}", err),
                None => error!("Provider call failed: {}", err),
            },
            ApiError::NonTextReply(kind) => warn!("Provider returned non-text content: {}", kind),
        }

        (self.status(), Json(json!({ "error": self.public_message() }))).into_response()
    }
}
