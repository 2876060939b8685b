//! Core data types for the prompthub service.
//!
//! This module defines the data structures shared by the catalog
//! builder, the session broker, and the adapters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// URI scheme prefix for every resource
pub const URI_SCHEME: &str = "prompthub:///";

/// MIME type reported for markdown documents
pub const MARKDOWN_MIME_TYPE: &str = "text/markdown";

/// Decoded frontmatter block
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// Result of a best-effort operation
///
/// `Degraded` still carries a usable value; `reasons` explains what
/// was skipped or ignored to produce it.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildOutcome<T> {
    Complete(T),
    Degraded { value: T, reasons: Vec<String> },
}

impl<T> BuildOutcome<T> {
    /// Borrow the value regardless of degradation
    pub fn value(&self) -> &T {
        match self {
            BuildOutcome::Complete(value) => value,
            BuildOutcome::Degraded { value, .. } => value,
        }
    }

    /// Take the value regardless of degradation
    pub fn into_value(self) -> T {
        match self {
            BuildOutcome::Complete(value) => value,
            BuildOutcome::Degraded { value, .. } => value,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, BuildOutcome::Degraded { .. })
    }

    /// Reasons for degradation (empty when complete)
    pub fn reasons(&self) -> &[String] {
        match self {
            BuildOutcome::Complete(_) => &[],
            BuildOutcome::Degraded { reasons, .. } => reasons,
        }
    }
}

/// One markdown document found during a catalog build
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceEntry {
    /// Path segments relative to the scan root
    pub relative_path: Vec<String>,

    /// `prompthub:///` + slash-joined relative path
    pub uri: String,

    pub name: String,

    pub description: String,

    #[serde(rename = "mimeType")]
    pub mime_type: String,

    /// Frontmatter mapping, if the document had a valid block
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,

    /// Body text without frontmatter and title line
    #[serde(skip)]
    pub content: String,
}

impl ResourceEntry {
    /// Build the URI for a relative path
    pub fn uri_for(segments: &[String]) -> String {
        format!("{URI_SCHEME}{}", segments.join("/"))
    }

    /// Protocol-specific `type` override from metadata
    pub fn kind(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.get("type"))
            .and_then(|v| v.as_str())
    }

    /// Project down to the fields exposed by `resources/list`
    pub fn summary(&self) -> ResourceSummary {
        ResourceSummary {
            uri: self.uri.clone(),
            name: self.name.clone(),
            mime_type: self.mime_type.clone(),
        }
    }
}

/// Public projection of a resource for listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSummary {
    pub uri: String,
    pub name: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

/// Contents of a single resource for reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceContents {
    pub uri: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub text: String,
}

/// The result of one catalog build
///
/// Entries keep traversal order; lookups by URI go through an index
/// built alongside them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: Vec<ResourceEntry>,
    by_uri: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(entries: Vec<ResourceEntry>) -> Self {
        let mut by_uri = HashMap::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            // First occurrence wins, same as a front-to-back scan
            by_uri.entry(entry.uri.clone()).or_insert(idx);
        }
        Self { entries, by_uri }
    }

    pub fn entries(&self) -> &[ResourceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find an entry by URI
    pub fn find(&self, uri: &str) -> Option<&ResourceEntry> {
        self.by_uri.get(uri).map(|&idx| &self.entries[idx])
    }

    pub fn summaries(&self) -> Vec<ResourceSummary> {
        self.entries.iter().map(ResourceEntry::summary).collect()
    }
}

/// Snapshot of an open streaming session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    pub id: String,
    pub created_at: DateTime<Utc>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub active_sessions: usize,
}

/// Response for the plain HTTP resource listing
#[derive(Debug, Clone, Serialize)]
pub struct ResourcesResponse {
    pub resources: Vec<ResourceEntry>,
}
