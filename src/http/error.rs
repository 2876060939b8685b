//! HTTP status mapping for core errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::core::error::PromptHubError;

/// Convert error to appropriate HTTP status code
pub fn status_code(err: &PromptHubError) -> StatusCode {
    match err {
        PromptHubError::Unauthorized => StatusCode::UNAUTHORIZED,
        PromptHubError::UnknownResource(_) => StatusCode::NOT_FOUND,
        PromptHubError::UnknownSession(_) | PromptHubError::InvalidMessage(_) => {
            StatusCode::BAD_REQUEST
        }
        PromptHubError::TransportFailure(_)
        | PromptHubError::SessionIdCollision(_)
        | PromptHubError::ConfigError(_)
        | PromptHubError::IoError(_)
        | PromptHubError::SerdeError(_)
        | PromptHubError::TomlError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Implement IntoResponse for automatic error conversion in Axum
impl IntoResponse for PromptHubError {
    fn into_response(self) -> Response {
        let status = status_code(&self);
        let message = self.message();

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
