//! SSE transport for MCP protocol
//!
//! A session's transport is a pair of unbounded channels. Inbound
//! client messages arrive through [`SseTransport::deliver`] (called by
//! the broker) and are consumed by the session loop; outbound frames
//! are produced by the session loop and consumed by the HTTP layer,
//! which turns each one into a server-sent event.

use crate::core::session::{Transport, TransportError};
use crate::mcp::protocol::JsonRpcResponse;
use serde_json::Value;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// A server-to-client frame
#[derive(Debug, Clone)]
pub enum Frame {
    /// Path the client must POST its messages to
    Endpoint(String),

    /// JSON-RPC response
    Message(JsonRpcResponse),
}

impl Frame {
    /// SSE event name
    pub fn event_name(&self) -> &'static str {
        match self {
            Frame::Endpoint(_) => "endpoint",
            Frame::Message(_) => "message",
        }
    }

    /// SSE data payload
    pub fn data(&self) -> serde_json::Result<String> {
        match self {
            Frame::Endpoint(path) => Ok(path.clone()),
            Frame::Message(response) => serde_json::to_string(response),
        }
    }
}

/// Channel ends kept by the session loop and the HTTP stream
pub struct SessionChannels {
    /// Inbound client messages, read by the session loop
    pub inbound: UnboundedReceiver<Value>,

    /// Outbound frames, written by the session loop
    pub outbound_tx: UnboundedSender<Frame>,

    /// Outbound frames, read by the response stream
    pub outbound_rx: UnboundedReceiver<Frame>,
}

/// Broker-facing handle of one SSE session
pub struct SseTransport {
    inbound: UnboundedSender<Value>,
}

impl SseTransport {
    /// Create a transport and the channel ends it feeds
    pub fn open() -> (Self, SessionChannels) {
        let (inbound_tx, inbound_rx) = unbounded_channel();
        let (outbound_tx, outbound_rx) = unbounded_channel();

        (
            Self { inbound: inbound_tx },
            SessionChannels {
                inbound: inbound_rx,
                outbound_tx,
                outbound_rx,
            },
        )
    }
}

impl Transport for SseTransport {
    fn deliver(&self, message: Value) -> Result<(), TransportError> {
        self.inbound
            .send(message)
            .map_err(|_| TransportError::Closed)
    }
}
