//! HTTP request handlers for the prompthub service
//!
//! Implements the health check, the plain resource retrieval
//! endpoints, and the two halves of the streaming protocol: opening
//! an event stream and posting messages to it.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    Json,
};
use futures::stream::{self, Stream};
use serde_json::Value;

use crate::core::error::PromptHubError;
use crate::core::services::Services;
use crate::core::session::SessionGuard;
use crate::core::types::*;
use crate::mcp::{Frame, McpServer, SessionChannels, SseTransport};

/// Health check handler
///
/// Returns server status, version, and the number of open sessions.
pub async fn health_handler(State(services): State<Arc<Services>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        active_sessions: services.broker.session_count(),
    })
}

/// List resources handler
///
/// Builds a fresh catalog and returns every entry with its derived
/// fields and metadata. Content is not included.
pub async fn list_resources_handler(
    State(services): State<Arc<Services>>,
) -> Json<ResourcesResponse> {
    let catalog = services.catalog().await.into_value();

    Json(ResourcesResponse {
        resources: catalog.entries().to_vec(),
    })
}

/// Read resource handler
///
/// Returns the content of the resource whose URI is
/// `prompthub:///{path}` as markdown text.
///
/// # Errors
///
/// - `UnknownResource`: no such document in the current catalog
pub async fn read_resource_handler(
    State(services): State<Arc<Services>>,
    Path(path): Path<String>,
) -> Result<Response, PromptHubError> {
    let uri = format!("{URI_SCHEME}{path}");
    let catalog = services.catalog().await.into_value();

    let entry = catalog
        .find(&uri)
        .ok_or_else(|| PromptHubError::UnknownResource(uri.clone()))?;

    Ok((
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        entry.content.clone(),
    )
        .into_response())
}

/// Open a streaming session
///
/// Registers a new session with the broker, starts its message loop,
/// and returns the event stream. The first event names the endpoint
/// the client must POST its messages to. The session is closed when
/// the stream is dropped.
///
/// # Errors
///
/// - `Unauthorized`: the path token is not configured
/// - `SessionIdCollision`: id generation produced a live id
pub async fn stream_handler(
    State(services): State<Arc<Services>>,
    Path(token): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, PromptHubError> {
    if !services.auth.is_valid(&token) {
        tracing::warn!("Rejected stream request with invalid token");
        return Err(PromptHubError::Unauthorized);
    }

    let (transport, channels) = SseTransport::open();
    let SessionChannels {
        inbound,
        outbound_tx,
        outbound_rx,
    } = channels;

    let session_id = services.broker.open_session(Arc::new(transport))?;
    let guard = SessionGuard::new(Arc::clone(&services.broker), session_id.clone());

    let endpoint = format!("/{token}/stream/messages/{session_id}");
    // The receiver is held below, so this cannot fail
    let _ = outbound_tx.send(Frame::Endpoint(endpoint));

    let server = McpServer::new(Arc::clone(&services));
    tokio::spawn(async move {
        server.run_session(inbound, outbound_tx).await;
    });

    // The guard lives inside the stream state: dropping the stream
    // (client gone, server shutdown) closes the session.
    let stream = stream::unfold((outbound_rx, guard), |(mut rx, guard)| async move {
        let frame = rx.recv().await?;
        Some((Ok::<_, Infallible>(frame_to_event(&frame)), (rx, guard)))
    });

    let interval = Duration::from_secs(services.config.stream.keep_alive_secs);
    Ok(Sse::new(stream).keep_alive(KeepAlive::new().interval(interval)))
}

/// Route a client message to its session
///
/// The response, if any, is delivered on the session's event
/// stream; this call only acknowledges receipt.
///
/// # Errors
///
/// - `Unauthorized`: the path token is not configured
/// - `UnknownSession`: no open session with this id
/// - `InvalidMessage`: body is not JSON
/// - `TransportFailure`: the session could not accept the message
pub async fn message_handler(
    State(services): State<Arc<Services>>,
    Path((token, session_id)): Path<(String, String)>,
    body: Bytes,
) -> Result<impl IntoResponse, PromptHubError> {
    if !services.auth.is_valid(&token) {
        tracing::warn!("Rejected message with invalid token");
        return Err(PromptHubError::Unauthorized);
    }

    if !services.broker.contains(&session_id) {
        tracing::info!(session_id = %session_id, "No active connection for session");
        return Err(PromptHubError::UnknownSession(session_id));
    }

    let message: Value = serde_json::from_slice(&body)
        .map_err(|e| PromptHubError::InvalidMessage(e.to_string()))?;

    services.broker.route_message(&session_id, message)?;

    Ok((StatusCode::ACCEPTED, "Accepted"))
}

fn frame_to_event(frame: &Frame) -> Event {
    let data = frame.data().unwrap_or_else(|e| {
        tracing::error!("Failed to encode frame: {}", e);
        "{}".to_string()
    });

    Event::default().event(frame.event_name()).data(data)
}
