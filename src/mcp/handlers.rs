//! MCP protocol method handlers

use crate::core::error::PromptHubError;
use crate::core::services::Services;
use crate::core::types::ResourceContents;
use crate::mcp::error::McpError;
use crate::mcp::protocol::*;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Method handlers for one session
///
/// Every list or read builds a fresh catalog; nothing is cached
/// between calls.
pub struct ProtocolHandlers {
    services: Arc<Services>,
    initialized: AtomicBool,
}

impl ProtocolHandlers {
    pub fn new(services: Arc<Services>) -> Self {
        Self {
            services,
            initialized: AtomicBool::new(false),
        }
    }

    /// Whether the client sent `notifications/initialized`
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    /// Handle initialize request
    pub async fn handle_initialize(
        &self,
        request: JsonRpcRequest,
    ) -> Result<JsonRpcResponse, McpError> {
        let params: InitializeParams = match request.params {
            Some(params) => serde_json::from_value(params)
                .map_err(|e| McpError::InvalidParams(format!("Invalid params: {e}")))?,
            None => InitializeParams::default(),
        };

        info!(
            client = params
                .client_info
                .as_ref()
                .map(|c| c.name.as_str())
                .unwrap_or("unknown"),
            "Client initialized"
        );

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                resources: ResourcesCapability {
                    subscribe: false,
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: "prompthub".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        Ok(JsonRpcResponse::success(
            request.id,
            serde_json::to_value(result)?,
        ))
    }

    /// Handle initialized notification
    pub async fn handle_initialized(
        &self,
        request: JsonRpcRequest,
    ) -> Result<JsonRpcResponse, McpError> {
        self.initialized.store(true, Ordering::SeqCst);
        debug!("Session initialized");

        Ok(JsonRpcResponse::success(request.id, json!({})))
    }

    /// Handle resources/list request
    pub async fn handle_resources_list(
        &self,
        request: JsonRpcRequest,
    ) -> Result<JsonRpcResponse, McpError> {
        let catalog = self.services.catalog().await.into_value();
        debug!("Listing {} resources", catalog.len());

        let result = ListResourcesResult {
            resources: catalog.summaries(),
        };

        Ok(JsonRpcResponse::success(
            request.id,
            serde_json::to_value(result)?,
        ))
    }

    /// Handle resources/read request
    pub async fn handle_resources_read(
        &self,
        request: JsonRpcRequest,
    ) -> Result<JsonRpcResponse, McpError> {
        let params_value = request
            .params
            .ok_or_else(|| McpError::InvalidParams("Missing params".to_string()))?;

        let params: ReadResourceParams = serde_json::from_value(params_value)
            .map_err(|e| McpError::InvalidParams(format!("Invalid params: {e}")))?;

        let catalog = self.services.catalog().await.into_value();
        let entry = catalog
            .find(&params.uri)
            .ok_or_else(|| PromptHubError::UnknownResource(params.uri.clone()))?;

        debug!("Returning resource {}", entry.uri);

        let result = ReadResourceResult {
            contents: vec![ResourceContents {
                uri: entry.uri.clone(),
                mime_type: entry.mime_type.clone(),
                text: entry.content.clone(),
            }],
        };

        Ok(JsonRpcResponse::success(
            request.id,
            serde_json::to_value(result)?,
        ))
    }

    /// Handle resources/templates/list request
    pub async fn handle_resource_templates_list(
        &self,
        request: JsonRpcRequest,
    ) -> Result<JsonRpcResponse, McpError> {
        let result = ListResourceTemplatesResult {
            resource_templates: Vec::<Value>::new(),
        };

        Ok(JsonRpcResponse::success(
            request.id,
            serde_json::to_value(result)?,
        ))
    }

    /// Handle ping request
    pub async fn handle_ping(&self, request: JsonRpcRequest) -> Result<JsonRpcResponse, McpError> {
        Ok(JsonRpcResponse::success(request.id, json!({})))
    }
}
