//! Transport capability seen by the session broker.
//!
//! The broker never touches wire framing. It only needs a way to
//! hand an inbound client message to the session's transport; the
//! transport owns everything else, including pushing frames back to
//! the client.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("transport closed")]
    Closed,
}

/// Capability handle held by an open session
pub trait Transport: Send + Sync {
    /// Hand an inbound client message to the session
    ///
    /// Must not block; delivery is expected to enqueue the message
    /// for the session's own message loop.
    fn deliver(&self, message: serde_json::Value) -> Result<(), TransportError>;
}
