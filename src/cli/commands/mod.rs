//! CLI command implementations

pub mod list;
pub mod serve;

pub use list::ListArgs;
