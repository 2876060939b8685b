//! Catalog building.
//!
//! Coordinates one catalog build:
//! 1. Walk the resources root
//! 2. Read each markdown file
//! 3. Split frontmatter from body
//! 4. Derive name, description and content
//!
//! A build never fails. Problems with individual files, or with the
//! root itself, are logged and turn the outcome into
//! `BuildOutcome::Degraded` while the rest of the tree is still
//! indexed.

use std::fs;
use std::path::{Component, Path};
use std::time::Instant;

use crate::core::error::{PromptHubError, Result};
use crate::core::indexer::frontmatter;
use crate::core::indexer::FileWalker;
use crate::core::types::{BuildOutcome, Catalog, Metadata, ResourceEntry, MARKDOWN_MIME_TYPE};

/// Builds a fresh [`Catalog`] from a directory tree
#[derive(Clone)]
pub struct IndexBuilder {
    extensions: Vec<String>,
}

impl IndexBuilder {
    /// Create a builder collecting files with the given extensions
    pub fn new(extensions: Vec<String>) -> Self {
        Self { extensions }
    }

    /// Build a catalog of every markdown file under `root`
    ///
    /// Entries come out in walk order (depth-first, sorted by file
    /// name). A missing or unreadable root yields an empty, degraded
    /// catalog.
    pub fn build(&self, root: &Path) -> BuildOutcome<Catalog> {
        let start = Instant::now();
        let mut reasons = Vec::new();

        match fs::metadata(root) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                tracing::error!("Resources root is not a directory: {:?}", root);
                return BuildOutcome::Degraded {
                    value: Catalog::default(),
                    reasons: vec![format!("not a directory: {}", root.display())],
                };
            }
            Err(e) => {
                tracing::error!("Cannot open resources root {:?}: {}", root, e);
                return BuildOutcome::Degraded {
                    value: Catalog::default(),
                    reasons: vec![format!("cannot open {}: {e}", root.display())],
                };
            }
        }

        let walk = FileWalker::new(&self.extensions).collect_files(root);
        reasons.extend(walk.errors);

        let mut entries = Vec::with_capacity(walk.files.len());
        let mut files_skipped = 0;

        for file_path in &walk.files {
            match Self::process_file(root, file_path) {
                Ok((entry, degraded)) => {
                    tracing::debug!("Indexed {:?} as {}", file_path, entry.uri);
                    reasons.extend(degraded);
                    entries.push(entry);
                }
                Err(e) => {
                    tracing::warn!("Failed to process {:?}: {}", file_path, e);
                    reasons.push(format!("{}: {e}", file_path.display()));
                    files_skipped += 1;
                    // Continue processing other files
                }
            }
        }

        tracing::debug!(
            "Catalog build complete: {} resources, {} skipped in {}ms",
            entries.len(),
            files_skipped,
            start.elapsed().as_millis()
        );

        let catalog = Catalog::new(entries);
        if reasons.is_empty() {
            BuildOutcome::Complete(catalog)
        } else {
            BuildOutcome::Degraded {
                value: catalog,
                reasons,
            }
        }
    }

    /// Build on the blocking thread pool
    ///
    /// Each call owns its traversal state, so overlapping builds do
    /// not interfere with each other.
    pub async fn build_async(&self, root: &Path) -> BuildOutcome<Catalog> {
        let builder = self.clone();
        let root = root.to_path_buf();

        match tokio::task::spawn_blocking(move || builder.build(&root)).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("Catalog build task failed: {}", e);
                BuildOutcome::Degraded {
                    value: Catalog::default(),
                    reasons: vec![format!("build task failed: {e}")],
                }
            }
        }
    }

    /// Read one file and turn it into an entry
    ///
    /// Returns the entry plus any degradation reasons (malformed
    /// frontmatter). Read errors are returned as `Err` and the file
    /// is skipped by the caller.
    fn process_file(root: &Path, path: &Path) -> Result<(ResourceEntry, Vec<String>)> {
        let text = fs::read_to_string(path)?;
        let relative_path = relative_segments(root, path)?;

        let parsed = frontmatter::parse(&text);
        let degraded = parsed
            .reasons()
            .iter()
            .map(|r| format!("{}: {r}", path.display()))
            .collect();
        let parsed = parsed.into_value();

        let (title, content) = split_title(&parsed.body);
        let title = title.unwrap_or_else(|| {
            path.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        });

        let metadata = parsed.metadata;
        let name = metadata_string(metadata.as_ref(), "name").unwrap_or_else(|| title.clone());
        let description = metadata_string(metadata.as_ref(), "description").unwrap_or(title);

        let entry = ResourceEntry {
            uri: ResourceEntry::uri_for(&relative_path),
            relative_path,
            name,
            description,
            mime_type: MARKDOWN_MIME_TYPE.to_string(),
            metadata,
            content,
        };

        Ok((entry, degraded))
    }
}

/// Path segments of `path` relative to `root`
fn relative_segments(root: &Path, path: &Path) -> Result<Vec<String>> {
    let relative = path.strip_prefix(root).map_err(|e| {
        PromptHubError::IoError(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("{} is outside {}: {e}", path.display(), root.display()),
        ))
    })?;

    let mut segments = Vec::new();
    for component in relative.components() {
        if let Component::Normal(segment) = component {
            // Lossy conversion would let two files share one URI
            let segment = segment.to_str().ok_or_else(|| {
                PromptHubError::IoError(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("{} is not valid UTF-8", path.display()),
                ))
            })?;
            segments.push(segment.to_string());
        }
    }

    Ok(segments)
}

/// Split the title line off a body
///
/// The title is the first non-blank line with leading `#` markup
/// removed; the content is everything after it, trimmed.
fn split_title(body: &str) -> (Option<String>, String) {
    let mut lines = body.lines();

    for line in lines.by_ref() {
        if line.trim().is_empty() {
            continue;
        }
        let title = line.trim().trim_start_matches('#').trim().to_string();
        let content = lines.collect::<Vec<_>>().join("\n").trim().to_string();
        return (Some(title).filter(|t| !t.is_empty()), content);
    }

    (None, String::new())
}

fn metadata_string(metadata: Option<&Metadata>, key: &str) -> Option<String> {
    metadata
        .and_then(|m| m.get(key))
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
