//! MCP protocol unit tests

#[cfg(test)]
mod tests {
    use prompthub::core::types::ResourceSummary;
    use prompthub::mcp::protocol::*;
    use serde_json::json;

    #[test]
    fn test_parse_initialize_request() {
        let json = r#"{
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": {
                "protocolVersion": "2024-11-05",
                "capabilities": {},
                "clientInfo": {
                    "name": "test",
                    "version": "1.0"
                }
            }
        }"#;

        let req: JsonRpcRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.method, "initialize");
        assert_eq!(req.jsonrpc, "2.0");
        assert!(!req.is_notification());

        let params: InitializeParams = serde_json::from_value(req.params.unwrap()).unwrap();
        assert_eq!(params.protocol_version.as_deref(), Some("2024-11-05"));
        assert_eq!(params.client_info.unwrap().name, "test");
    }

    #[test]
    fn test_parse_notification() {
        let json = r#"{"jsonrpc": "2.0", "method": "notifications/initialized"}"#;

        let req: JsonRpcRequest = serde_json::from_str(json).unwrap();
        assert!(req.is_notification());
        assert!(req.params.is_none());
    }

    #[test]
    fn test_serialize_initialize_result() {
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
                version: "0.1.0".to_string(),
            },
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["protocolVersion"], "2024-11-05");
        assert_eq!(json["capabilities"]["resources"]["listChanged"], false);
        assert_eq!(json["serverInfo"]["name"], "prompthub");
    }

    #[test]
    fn test_success_response_omits_error() {
        let response = JsonRpcResponse::success(Some(json!(7)), json!({"ok": true}));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["jsonrpc"], "2.0");
        assert_eq!(json["id"], 7);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_error_response_shape() {
        let response = JsonRpcResponse::error(
            Some(json!("abc")),
            RESOURCE_NOT_FOUND,
            "Unknown resource: prompthub:///x.md".to_string(),
        );
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["error"]["code"], -32002);
        assert!(json.get("result").is_none());
        assert!(json["error"].get("data").is_none());
    }

    #[test]
    fn test_list_result_shape() {
        let result = ListResourcesResult {
            resources: vec![ResourceSummary {
                uri: "prompthub:///a.md".to_string(),
                name: "A".to_string(),
                mime_type: "text/markdown".to_string(),
            }],
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["resources"][0]["mimeType"], "text/markdown");
    }

    #[test]
    fn test_templates_result_shape() {
        let result = ListResourceTemplatesResult {
            resource_templates: vec![],
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, json!({"resourceTemplates": []}));
    }
}
