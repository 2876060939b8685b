//! Resource indexing module.
//!
//! Turns a directory of markdown documents into a [`Catalog`]:
//!
//! - `walker`: deterministic depth-first file discovery
//! - `frontmatter`: optional YAML metadata block parsing
//! - `builder`: per-file field derivation and catalog assembly
//!
//! Catalogs are rebuilt on every request; nothing is cached between
//! builds.
//!
//! [`Catalog`]: crate::core::types::Catalog

pub mod builder;
pub mod frontmatter;
pub mod walker;

pub use builder::IndexBuilder;
pub use frontmatter::ParsedDocument;
pub use walker::FileWalker;
