//! Core domain logic (protocol-agnostic)
//!
//! This module contains all business logic that is independent
//! of transport protocols (HTTP, MCP, etc).
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Domain data structures
//! - **auth**: Access token gate
//! - **indexer**: Markdown discovery, frontmatter, catalog building
//! - **session**: Streaming session broker
//! - **services**: Unified service container

pub mod auth;
pub mod config;
pub mod error;
pub mod indexer;
pub mod services;
pub mod session;
pub mod types;

// Re-export key types for convenience
pub use config::Config;
pub use error::{PromptHubError, Result};
pub use services::Services;
