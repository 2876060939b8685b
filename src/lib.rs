//! PromptHub - markdown resources over HTTP and MCP
//!
//! Serves a directory of markdown documents (with optional YAML
//! frontmatter) as addressable resources. Clients either fetch them
//! through plain token-protected REST routes or open a long-lived
//! MCP session carried over server-sent events.
//!
//! # Architecture
//!
//! - **core**: Domain logic (protocol-agnostic)
//!   - config, error, types, auth
//!   - indexer (file walking, frontmatter, catalog building)
//!   - session (session broker, transport seam)
//!   - services (unified service container)
//!
//! - **http**: Axum adapter (depends on core and mcp)
//!   - router, handlers, middleware
//!
//! - **mcp**: MCP adapter (depends on core)
//!   - server, handlers, protocol, SSE transport
//!
//! - **cli**: clap entry point (`serve`, `list`)

// Command-line adapter
pub mod cli;

// Core domain logic (protocol-agnostic)
pub mod core;

// HTTP adapter
pub mod http;

// MCP (Model Context Protocol) adapter
pub mod mcp;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{PromptHubError, Result};
pub use core::services::Services;
pub use core::types::*;
