//! File system walker for markdown resources.
//!
//! Traverses a directory tree depth-first with entries sorted by
//! file name at every level, so repeated walks over an unchanged tree
//! yield the same order. Errors below the root (permission denied,
//! vanished entries) are collected without stopping the walk.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Files found by a walk, plus the errors encountered on the way
#[derive(Debug, Default)]
pub struct WalkResult {
    pub files: Vec<PathBuf>,
    pub errors: Vec<String>,
}

/// File system walker with extension-based filtering
pub struct FileWalker {
    /// Lowercased extensions without the leading dot (e.g. "md")
    extensions: Vec<String>,
}

impl FileWalker {
    /// Create a new file walker
    ///
    /// # Arguments
    ///
    /// * `extensions` - File extensions to collect, matched
    ///   case-insensitively, with or without a leading dot
    pub fn new(extensions: &[String]) -> Self {
        let extensions = extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
            .collect();

        Self { extensions }
    }

    /// Collect all matching files under `root`
    ///
    /// Symlinks are not followed and are never collected. The caller
    /// is expected to have checked that `root` is a readable
    /// directory; a failure on the root itself is reported in
    /// `errors` like any other.
    pub fn collect_files(&self, root: &Path) -> WalkResult {
        let mut result = WalkResult::default();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
        {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_file() && self.matches_extension(entry.path()) {
                        result.files.push(entry.into_path());
                    }
                }
                Err(e) => {
                    tracing::warn!("Walk error: {}", e);
                    result.errors.push(e.to_string());
                    // Continue walking despite errors
                }
            }
        }

        result
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext = ext.to_ascii_lowercase();
                self.extensions.iter().any(|e| *e == ext)
            })
            .unwrap_or(false)
    }
}
