//! MCP-specific error types

use thiserror::Error;

use crate::mcp::protocol::{
    INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND, RESOURCE_NOT_FOUND,
};

#[derive(Debug, Error)]
pub enum McpError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Protocol error (code {0}): {1}")]
    ProtocolError(i32, String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl McpError {
    /// JSON-RPC error code and message for this error
    pub fn to_rpc_error(&self) -> (i32, String) {
        match self {
            McpError::InvalidRequest(msg) => (INVALID_REQUEST, msg.clone()),
            McpError::MethodNotFound(method) => {
                (METHOD_NOT_FOUND, format!("Unknown method: {method}"))
            }
            McpError::InvalidParams(msg) => (INVALID_PARAMS, msg.clone()),
            McpError::InternalError(msg) => (INTERNAL_ERROR, msg.clone()),
            McpError::ProtocolError(code, msg) => (*code, msg.clone()),
            McpError::Json(e) => (INTERNAL_ERROR, format!("JSON error: {e}")),
        }
    }
}

impl From<crate::core::error::PromptHubError> for McpError {
    fn from(err: crate::core::error::PromptHubError) -> Self {
        use crate::core::error::PromptHubError;
        match err {
            PromptHubError::UnknownResource(uri) => {
                McpError::ProtocolError(RESOURCE_NOT_FOUND, format!("Unknown resource: {uri}"))
            }
            PromptHubError::InvalidMessage(msg) => McpError::InvalidRequest(msg),
            PromptHubError::Unauthorized => {
                McpError::InvalidRequest("Invalid or missing access token".to_string())
            }
            PromptHubError::UnknownSession(id) => {
                McpError::InvalidRequest(format!("Unknown session: {id}"))
            }
            PromptHubError::ConfigError(s) => {
                McpError::InternalError(format!("Configuration error: {s}"))
            }
            PromptHubError::TransportFailure(s) => {
                McpError::InternalError(format!("Transport failure: {s}"))
            }
            PromptHubError::SessionIdCollision(id) => {
                McpError::InternalError(format!("Session id collision: {id}"))
            }
            PromptHubError::IoError(e) => McpError::InternalError(format!("I/O error: {e}")),
            PromptHubError::SerdeError(e) => {
                McpError::InternalError(format!("Serialization error: {e}"))
            }
            PromptHubError::TomlError(e) => {
                McpError::InternalError(format!("Configuration parse error: {e}"))
            }
        }
    }
}
