//! Streaming session management.
//!
//! - `broker`: the session table, message routing, close-on-drop guard
//! - `transport`: the capability a session's transport must provide

pub mod broker;
pub mod transport;

pub use broker::{SessionBroker, SessionGuard};
pub use transport::{Transport, TransportError};
