//! Serve command - run the HTTP server until interrupted

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::core::services::Services;
use crate::http;

/// Execute the serve command
///
/// Binding failure is fatal. On Ctrl-C every open session is closed,
/// which ends its event stream and lets the server drain.
pub async fn execute(services: Arc<Services>) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Starting prompthub");
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));
    services.config.log_config();

    let catalog = services.catalog().await;
    tracing::info!(
        "Found {} resource(s) under {:?}",
        catalog.value().len(),
        services.config.resources.root
    );

    let addr = services.config.bind_addr();
    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        tracing::error!("Failed to bind {}: {}", addr, e);
        e
    })?;

    tracing::info!("Listening on {}", addr);
    tracing::info!("Service ready - Health check at http://{}/health", addr);

    let app = http::router(Arc::clone(&services));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(services))
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal(services: Arc<Services>) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }

    tracing::info!("Shutdown requested");
    services.shutdown();
}
