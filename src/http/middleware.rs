//! Middleware for the prompthub HTTP adapter
//!
//! Provides request logging with duration tracking, and the access
//! token check for the plain retrieval routes.

use axum::{
    body::Body,
    extract::{MatchedPath, Query, State},
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

use crate::core::auth::Credentials;
use crate::core::error::PromptHubError;
use crate::core::services::Services;

/// Request logging middleware
///
/// Logs method, route template, status code, and duration. The
/// route template is logged instead of the request URI because
/// paths and query strings carry access tokens. Successful requests
/// are logged at INFO level, failed requests at ERROR level.
///
/// Must be installed with `route_layer` so the matched path is
/// available.
pub async fn log_request(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "<unmatched>".to_string());
    let start = Instant::now();

    // Process request
    let response = next.run(request).await;

    let duration_ms = start.elapsed().as_millis();
    let status = response.status();

    // Log based on status
    if status.is_success() {
        info!(
            method = %method,
            route = %route,
            status = %status.as_u16(),
            duration_ms = %duration_ms,
            "Request completed"
        );
    } else {
        error!(
            method = %method,
            route = %route,
            status = %status.as_u16(),
            duration_ms = %duration_ms,
            "Request failed"
        );
    }

    response
}

/// Reject requests without an accepted access token
///
/// The token is looked up in the `u` query parameter, then the
/// `token` query parameter, then the `Authorization` header.
pub async fn require_token(
    State(services): State<Arc<Services>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, PromptHubError> {
    let credentials = credentials_from_request(&request);

    if !services.auth.authorize(&credentials) {
        warn!(
            has_token = credentials.token().is_some(),
            "Rejected request without a valid token"
        );
        return Err(PromptHubError::Unauthorized);
    }

    Ok(next.run(request).await)
}

/// Collect token candidates from query string and headers
///
/// The query is decoded as a list of pairs so that repeated keys do
/// not hide a `u` or `token` parameter. A query string that cannot be
/// decoded at all yields credentials that are always rejected.
pub fn credentials_from_request<B>(request: &Request<B>) -> Credentials {
    let query = match Query::<Vec<(String, String)>>::try_from_uri(request.uri()) {
        Ok(Query(pairs)) => Credentials::from_query_pairs(pairs),
        Err(e) => {
            warn!("Undecodable query string: {}", e);
            return Credentials::rejected();
        }
    };

    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    query.with_authorization(header)
}
