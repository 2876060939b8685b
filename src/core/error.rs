//! Error types and error handling for the prompthub service.
//!
//! This module defines the error types used throughout the
//! application. Protocol-specific error handling (HTTP status codes,
//! MCP error codes) is handled in the respective adapter modules.
//!
//! Scan and metadata failures are deliberately absent here: they
//! degrade a [`BuildOutcome`](crate::core::types::BuildOutcome)
//! instead of surfacing as errors.

use thiserror::Error;

/// Result type alias for prompthub operations
pub type Result<T> = std::result::Result<T, PromptHubError>;

/// Main error type for the prompthub service
#[derive(Error, Debug)]
pub enum PromptHubError {
    #[error("Invalid or missing access token")]
    Unauthorized,

    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    #[error("No active connection found for session: {0}")]
    UnknownSession(String),

    #[error("Transport failure: {0}")]
    TransportFailure(String),

    #[error("Session id collision: {0}")]
    SessionIdCollision(String),

    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl PromptHubError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this is a "not found" type error
    pub fn is_not_found(&self) -> bool {
        matches!(self, PromptHubError::UnknownResource(_))
    }

    /// Check if this is an authorization failure
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, PromptHubError::Unauthorized)
    }

    /// Check if this is a bad request error (caller's fault)
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            PromptHubError::UnknownSession(_) | PromptHubError::InvalidMessage(_)
        )
    }
}
