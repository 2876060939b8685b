//! HTTP adapter
//!
//! Exposes the catalog over plain REST routes and carries MCP sessions
//! over server-sent events. Built on Axum.

pub mod error;
pub mod handlers;
pub mod middleware;

pub use handlers::*;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::core::services::Services;

/// Build the application router
///
/// | Route                                     | Access         |
/// |-------------------------------------------|----------------|
/// | `GET /health`                             | open           |
/// | `GET /resources`                          | token required |
/// | `GET /resources/*path`                    | token required |
/// | `GET /:token/stream`                      | path token     |
/// | `POST /:token/stream/messages/:sessionId` | path token     |
pub fn router(services: Arc<Services>) -> Router {
    let protected = Router::new()
        .route("/resources", get(list_resources_handler))
        .route("/resources/*path", get(read_resource_handler))
        .route_layer(axum_middleware::from_fn_with_state(
            Arc::clone(&services),
            middleware::require_token,
        ));

    Router::new()
        .route("/health", get(health_handler))
        .route("/:token/stream", get(stream_handler))
        .route(
            "/:token/stream/messages/:session_id",
            post(message_handler),
        )
        .merge(protected)
        .route_layer(axum_middleware::from_fn(middleware::log_request))
        .layer(CorsLayer::permissive())
        .with_state(services)
}
