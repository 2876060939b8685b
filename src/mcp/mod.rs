//! MCP (Model Context Protocol) server module
//!
//! Implements the JSON-RPC 2.0 resource methods of MCP on top of the
//! core catalog, carried over server-sent events: one [`McpServer`]
//! loop per open session, fed through an [`SseTransport`].

pub mod error;
pub mod handlers;
pub mod protocol;
pub mod server;
pub mod transport;

// Re-export main types
pub use error::McpError;
pub use handlers::ProtocolHandlers;
pub use server::McpServer;
pub use transport::{Frame, SessionChannels, SseTransport};
