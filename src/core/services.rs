//! Unified service container for prompthub
//!
//! Provides shared access to all core services. Created once at
//! startup and handed to every adapter; there is no global state.

use crate::core::auth::AuthGate;
use crate::core::config::Config;
use crate::core::indexer::IndexBuilder;
use crate::core::session::SessionBroker;
use crate::core::types::{BuildOutcome, Catalog};
use std::sync::Arc;

/// Unified services container
///
/// All adapters use this same struct for service access.
#[derive(Clone)]
pub struct Services {
    /// Access token gate
    pub auth: Arc<AuthGate>,

    /// Table of open streaming sessions
    pub broker: Arc<SessionBroker>,

    /// Catalog builder for the resources root
    pub indexer: Arc<IndexBuilder>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Create services from configuration
    pub fn new(config: Config) -> Self {
        let auth = Arc::new(AuthGate::new(config.auth.tokens.iter().cloned()));
        let indexer = Arc::new(IndexBuilder::new(config.resources.extensions.clone()));

        Self {
            auth,
            broker: Arc::new(SessionBroker::new()),
            indexer,
            config: Arc::new(config),
        }
    }

    /// Build a fresh catalog of the configured resources root
    pub async fn catalog(&self) -> BuildOutcome<Catalog> {
        let outcome = self
            .indexer
            .build_async(&self.config.resources.root)
            .await;

        if outcome.is_degraded() {
            tracing::warn!(
                "Catalog build degraded ({} problem(s)), serving {} resource(s)",
                outcome.reasons().len(),
                outcome.value().len()
            );
        }

        outcome
    }

    /// Tear down every open session
    pub fn shutdown(&self) -> usize {
        for session in self.broker.sessions() {
            tracing::debug!(
                session_id = %session.id,
                opened_at = %session.created_at,
                "Closing session"
            );
        }

        let closed = self.broker.close_all();
        tracing::info!(
            "Closed {} open session(s), {} opened since startup",
            closed,
            self.broker.total_opened()
        );
        closed
    }
}
