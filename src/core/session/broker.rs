//! Streaming session broker.
//!
//! Owns the table of open sessions. Each session is `OPEN` from
//! `open_session` until `close_session`, after which its id is gone
//! for good. Every table operation is a single step on a concurrent
//! map, so a route that starts after a close for the same id always
//! sees "no such session".

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{PromptHubError, Result};
use crate::core::session::Transport;
use crate::core::types::SessionInfo;

struct Session {
    transport: Arc<dyn Transport>,
    created_at: DateTime<Utc>,
}

/// Table of open streaming sessions
pub struct SessionBroker {
    sessions: DashMap<String, Session>,

    /// Sessions opened since startup
    total_opened: AtomicU64,
}

impl SessionBroker {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
            total_opened: AtomicU64::new(0),
        }
    }

    /// Register a transport under a fresh random id
    pub fn open_session(&self, transport: Arc<dyn Transport>) -> Result<String> {
        self.register(Uuid::new_v4().to_string(), transport)
    }

    /// Insert `id` unless it is already taken
    ///
    /// A taken id is an internal error: the existing session is left
    /// untouched.
    fn register(&self, id: String, transport: Arc<dyn Transport>) -> Result<String> {
        match self.sessions.entry(id.clone()) {
            Entry::Occupied(_) => {
                tracing::error!(session_id = %id, "Session id collision");
                Err(PromptHubError::SessionIdCollision(id))
            }
            Entry::Vacant(slot) => {
                slot.insert(Session {
                    transport,
                    created_at: Utc::now(),
                });
                self.total_opened.fetch_add(1, Ordering::Relaxed);
                tracing::info!(session_id = %id, "Session opened");
                Ok(id)
            }
        }
    }

    /// Forward a client message to the session's transport
    ///
    /// # Errors
    ///
    /// - `UnknownSession`: no open session with this id
    /// - `TransportFailure`: the transport refused the message; the
    ///   session stays registered until its transport reports closure
    pub fn route_message(&self, id: &str, message: serde_json::Value) -> Result<()> {
        let session = self
            .sessions
            .get(id)
            .ok_or_else(|| PromptHubError::UnknownSession(id.to_string()))?;

        session.transport.deliver(message).map_err(|e| {
            tracing::warn!(session_id = %id, "Message delivery failed: {}", e);
            PromptHubError::TransportFailure(e.to_string())
        })
    }

    /// Remove a session; returns whether it was open
    ///
    /// Closing an unknown or already closed id is a no-op.
    pub fn close_session(&self, id: &str) -> bool {
        let removed = self.sessions.remove(id).is_some();
        if removed {
            tracing::info!(session_id = %id, "Session closed");
        }
        removed
    }

    /// Close every open session, returning how many were closed
    pub fn close_all(&self) -> usize {
        let ids: Vec<String> = self.sessions.iter().map(|s| s.key().clone()).collect();
        ids.iter().filter(|id| self.close_session(id)).count()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sessions.contains_key(id)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn total_opened(&self) -> u64 {
        self.total_opened.load(Ordering::Relaxed)
    }

    /// Snapshot of open sessions, oldest first
    pub fn sessions(&self) -> Vec<SessionInfo> {
        let mut sessions: Vec<SessionInfo> = self
            .sessions
            .iter()
            .map(|s| SessionInfo {
                id: s.key().clone(),
                created_at: s.value().created_at,
            })
            .collect();
        sessions.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        sessions
    }
}

impl Default for SessionBroker {
    fn default() -> Self {
        Self::new()
    }
}

/// Closes its session when dropped
///
/// Tie one to whatever lives exactly as long as the client
/// connection (the response stream), so that disconnects close the
/// session once and only once.
pub struct SessionGuard {
    broker: Arc<SessionBroker>,
    id: String,
}

impl SessionGuard {
    pub fn new(broker: Arc<SessionBroker>, id: String) -> Self {
        Self { broker, id }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        if self.broker.close_session(&self.id) {
            tracing::debug!(session_id = %self.id, "Connection dropped");
        }
    }
}
