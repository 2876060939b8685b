//! MCP server implementation

use crate::core::services::Services;
use crate::mcp::error::McpError;
use crate::mcp::handlers::ProtocolHandlers;
use crate::mcp::protocol::*;
use crate::mcp::transport::Frame;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info};

/// Message loop of one streaming session
pub struct McpServer {
    handlers: ProtocolHandlers,
}

impl McpServer {
    pub fn new(services: Arc<Services>) -> Self {
        Self {
            handlers: ProtocolHandlers::new(services),
        }
    }

    pub fn handlers(&self) -> &ProtocolHandlers {
        &self.handlers
    }

    /// Run the session loop until either side goes away
    ///
    /// Ends when the inbound channel closes (the session was removed
    /// from the broker) or the outbound receiver is dropped (the
    /// client disconnected).
    pub async fn run_session(
        &self,
        mut inbound: UnboundedReceiver<Value>,
        outbound: UnboundedSender<Frame>,
    ) {
        loop {
            tokio::select! {
                message = inbound.recv() => {
                    let Some(message) = message else {
                        break;
                    };
                    if let Some(response) = self.process_message(message).await {
                        if outbound.send(Frame::Message(response)).is_err() {
                            break;
                        }
                    }
                }

                _ = outbound.closed() => {
                    break;
                }
            }
        }

        info!("Session loop finished");
    }

    /// Handle one inbound message
    ///
    /// Returns the response to push, or `None` for notifications.
    pub async fn process_message(&self, message: Value) -> Option<JsonRpcResponse> {
        debug!("Received: {}", message);

        if message.is_array() {
            return Some(JsonRpcResponse::error(
                None,
                INVALID_REQUEST,
                "Batch requests are not supported".to_string(),
            ));
        }

        let raw_id = message.get("id").cloned();
        let request: JsonRpcRequest = match serde_json::from_value(message) {
            Ok(request) => request,
            Err(e) => {
                return Some(JsonRpcResponse::error(
                    raw_id,
                    INVALID_REQUEST,
                    format!("Invalid request: {e}"),
                ));
            }
        };

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                request.id,
                INVALID_REQUEST,
                format!("Unsupported jsonrpc version: {}", request.jsonrpc),
            ));
        }

        let id = request.id.clone();
        let notification = request.is_notification();
        let method = request.method.clone();
        let outcome = self.dispatch(request).await;

        if notification {
            if let Err(e) = outcome {
                debug!("Notification {} failed: {}", method, e);
            }
            return None;
        }

        Some(match outcome {
            Ok(response) => response,
            Err(e) => {
                error!("Error processing {}: {}", method, e);
                let (code, message) = e.to_rpc_error();
                JsonRpcResponse::error(id, code, message)
            }
        })
    }

    async fn dispatch(&self, request: JsonRpcRequest) -> Result<JsonRpcResponse, McpError> {
        match request.method.as_str() {
            "initialize" => self.handlers.handle_initialize(request).await,
            "initialized" | "notifications/initialized" => {
                self.handlers.handle_initialized(request).await
            }
            "ping" => self.handlers.handle_ping(request).await,
            "resources/list" => self.handlers.handle_resources_list(request).await,
            "resources/read" => self.handlers.handle_resources_read(request).await,
            "resources/templates/list" => {
                self.handlers.handle_resource_templates_list(request).await
            }
            _ => Err(McpError::MethodNotFound(request.method)),
        }
    }
}
