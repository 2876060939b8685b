//! Integration tests for the event stream and message endpoint

use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::{json, Value};
use tokio::time::timeout;
use tower::ServiceExt as TowerServiceExt;

use crate::common::{body_string, create_test_app, next_event, parse_event, ResourceTree, TEST_TOKEN};

const EVENT_TIMEOUT: Duration = Duration::from_secs(5);

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn open_stream(token: &str) -> Request<Body> {
    Request::builder()
        .uri(format!("/{token}/stream"))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_stream_rejects_bad_token() {
    let tree = ResourceTree::sample();
    let (app, services) = create_test_app(tree.path());

    let response = app.oneshot(open_stream("wrong")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(services.broker.total_opened(), 0);
}

#[tokio::test]
async fn test_message_bad_token() {
    let tree = ResourceTree::sample();
    let (app, _services) = create_test_app(tree.path());

    let response = app
        .oneshot(post_json("/wrong/stream/messages/abc", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_message_unknown_session() {
    let tree = ResourceTree::sample();
    let (app, _services) = create_test_app(tree.path());

    let response = app
        .oneshot(post_json(
            &format!("/{TEST_TOKEN}/stream/messages/no-such-session"),
            json!({"jsonrpc": "2.0", "id": 1, "method": "ping"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert!(json["error"].as_str().unwrap().contains("no-such-session"));
}

#[tokio::test]
async fn test_full_session_flow() {
    let tree = ResourceTree::sample();
    let (app, services) = create_test_app(tree.path());

    let response = app.clone().oneshot(open_stream(TEST_TOKEN)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/event-stream"));
    assert_eq!(services.broker.session_count(), 1);

    let mut stream = response.into_body().into_data_stream();
    let mut buffer = String::new();

    // First event names the message endpoint
    let event = timeout(EVENT_TIMEOUT, next_event(&mut stream, &mut buffer))
        .await
        .unwrap()
        .unwrap();
    let (name, endpoint) = parse_event(&event);
    assert_eq!(name, "endpoint");

    let prefix = format!("/{TEST_TOKEN}/stream/messages/");
    let session_id = endpoint.strip_prefix(&prefix).unwrap().to_string();
    assert!(services.broker.contains(&session_id));

    // Initialize is acknowledged over HTTP and answered on the stream
    let response = app
        .clone()
        .oneshot(post_json(
            &endpoint,
            json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "initialize",
                "params": {"protocolVersion": "2024-11-05", "capabilities": {}}
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert_eq!(body_string(response).await, "Accepted");

    let event = timeout(EVENT_TIMEOUT, next_event(&mut stream, &mut buffer))
        .await
        .unwrap()
        .unwrap();
    let (name, data) = parse_event(&event);
    assert_eq!(name, "message");

    let message: Value = serde_json::from_str(&data).unwrap();
    assert_eq!(message["id"], 1);
    assert_eq!(message["result"]["serverInfo"]["name"], "prompthub");
    assert_eq!(message["result"]["capabilities"]["resources"]["subscribe"], false);

    // Notifications are accepted but produce nothing on the stream
    let response = app
        .clone()
        .oneshot(post_json(
            &endpoint,
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let response = app
        .clone()
        .oneshot(post_json(
            &endpoint,
            json!({"jsonrpc": "2.0", "id": 2, "method": "resources/read", "params": {"uri": "prompthub:///b.md"}}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let event = timeout(EVENT_TIMEOUT, next_event(&mut stream, &mut buffer))
        .await
        .unwrap()
        .unwrap();
    let (_, data) = parse_event(&event);
    let message: Value = serde_json::from_str(&data).unwrap();
    assert_eq!(message["id"], 2);
    assert_eq!(message["result"]["contents"][0]["text"], "Body text");

    // Client goes away: the session is gone and further posts fail
    drop(stream);
    assert_eq!(services.broker.session_count(), 0);

    let response = app
        .oneshot(post_json(
            &endpoint,
            json!({"jsonrpc": "2.0", "id": 3, "method": "ping"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_json_message() {
    let tree = ResourceTree::sample();
    let (app, services) = create_test_app(tree.path());

    let response = app.clone().oneshot(open_stream(TEST_TOKEN)).await.unwrap();
    let mut stream = response.into_body().into_data_stream();
    let mut buffer = String::new();

    let event = timeout(EVENT_TIMEOUT, next_event(&mut stream, &mut buffer))
        .await
        .unwrap()
        .unwrap();
    let (_, endpoint) = parse_event(&event);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(&endpoint)
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // A bad message does not end the session
    assert_eq!(services.broker.session_count(), 1);
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let tree = ResourceTree::sample();
    let (app, services) = create_test_app(tree.path());

    let mut streams = Vec::new();
    let mut endpoints = Vec::new();
    for _ in 0..2 {
        let response = app.clone().oneshot(open_stream(TEST_TOKEN)).await.unwrap();
        let mut stream = response.into_body().into_data_stream();
        let mut buffer = String::new();

        let event = timeout(EVENT_TIMEOUT, next_event(&mut stream, &mut buffer))
            .await
            .unwrap()
            .unwrap();
        endpoints.push(parse_event(&event).1);
        streams.push((stream, buffer));
    }
    assert_ne!(endpoints[0], endpoints[1]);
    assert_eq!(services.broker.session_count(), 2);

    let response = app
        .clone()
        .oneshot(post_json(
            &endpoints[1],
            json!({"jsonrpc": "2.0", "id": "only-second", "method": "ping"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let (stream, buffer) = &mut streams[1];
    let event = timeout(EVENT_TIMEOUT, next_event(stream, buffer))
        .await
        .unwrap()
        .unwrap();
    let message: Value = serde_json::from_str(&parse_event(&event).1).unwrap();
    assert_eq!(message["id"], "only-second");

    // The first stream received nothing beyond its endpoint event
    let (stream, buffer) = &mut streams[0];
    let nothing = timeout(Duration::from_millis(200), next_event(stream, buffer)).await;
    assert!(nothing.is_err());

    // Closing one session leaves the other open
    streams.remove(0);
    assert_eq!(services.broker.session_count(), 1);
}

#[tokio::test]
async fn test_shutdown_ends_streams() {
    let tree = ResourceTree::sample();
    let (app, services) = create_test_app(tree.path());

    let response = app.oneshot(open_stream(TEST_TOKEN)).await.unwrap();
    let mut stream = response.into_body().into_data_stream();
    let mut buffer = String::new();

    timeout(EVENT_TIMEOUT, next_event(&mut stream, &mut buffer))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(services.shutdown(), 1);

    let end = timeout(EVENT_TIMEOUT, next_event(&mut stream, &mut buffer))
        .await
        .unwrap();
    assert!(end.is_none());
}
