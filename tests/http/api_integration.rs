//! Integration tests for the plain REST routes

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt as TowerServiceExt;

use crate::common::{body_string, create_test_app, ResourceTree, TEST_TOKEN};

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let tree = ResourceTree::sample();
    let (app, _services) = create_test_app(tree.path());

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["active_sessions"], 0);
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_list_requires_token() {
    let tree = ResourceTree::sample();
    let (app, _services) = create_test_app(tree.path());

    let response = app.clone().oneshot(get("/resources")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["status"], 401);

    let response = app.oneshot(get("/resources?u=wrong")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_accepts_every_token_source() {
    let tree = ResourceTree::sample();
    let (app, _services) = create_test_app(tree.path());

    let requests = vec![
        get(&format!("/resources?u={TEST_TOKEN}")),
        get(&format!("/resources?token={TEST_TOKEN}")),
        Request::builder()
            .uri("/resources")
            .header(header::AUTHORIZATION, TEST_TOKEN)
            .body(Body::empty())
            .unwrap(),
        Request::builder()
            .uri("/resources")
            .header(header::AUTHORIZATION, format!("Bearer {TEST_TOKEN}"))
            .body(Body::empty())
            .unwrap(),
    ];

    for request in requests {
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn test_list_resources_body() {
    let tree = ResourceTree::sample();
    let (app, _services) = create_test_app(tree.path());

    let response = app
        .oneshot(get(&format!("/resources?u={TEST_TOKEN}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
    let resources = json["resources"].as_array().unwrap();
    assert_eq!(resources.len(), 3);

    let first = &resources[0];
    assert_eq!(first["uri"], "prompthub:///a.md");
    assert_eq!(first["name"], "Greeting");
    assert_eq!(first["description"], "Says hi");
    assert_eq!(first["mimeType"], "text/markdown");
    assert_eq!(first["metadata"]["tags"][0], "demo");
    assert!(first.get("content").is_none());

    // No frontmatter means no metadata key at all
    assert!(resources[1].get("metadata").is_none());
}

#[tokio::test]
async fn test_read_resource() {
    let tree = ResourceTree::sample();
    let (app, _services) = create_test_app(tree.path());

    let response = app
        .oneshot(get(&format!("/resources/guides/setup.md?token={TEST_TOKEN}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/markdown"));
    assert_eq!(body_string(response).await, "Run the installer.");
}

#[tokio::test]
async fn test_read_unknown_resource() {
    let tree = ResourceTree::sample();
    let (app, _services) = create_test_app(tree.path());

    let response = app
        .clone()
        .oneshot(get(&format!("/resources/missing.md?u={TEST_TOKEN}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Ignored extensions are not resources
    let response = app
        .oneshot(get(&format!("/resources/notes.txt?u={TEST_TOKEN}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_read_requires_token() {
    let tree = ResourceTree::sample();
    let (app, _services) = create_test_app(tree.path());

    let response = app.oneshot(get("/resources/a.md")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_missing_root_serves_empty_list() {
    let tree = ResourceTree::with_files(&[]);
    let missing = tree.path().join("absent");
    let (app, _services) = create_test_app(&missing);

    let response = app
        .oneshot(get(&format!("/resources?u={TEST_TOKEN}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert!(json["resources"].as_array().unwrap().is_empty());
}
