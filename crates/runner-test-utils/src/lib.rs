//! Shared test utilities for the sync-runner workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`tree`] - [`SourceTree`] builder for sized source directories
//! - [`stub`] - [`StubTool`] scripts standing in for the sync tool (unix)
//! - [`logs`] - transfer-log fixtures

pub mod logs;
#[cfg(unix)]
pub mod stub;
pub mod tree;

#[cfg(unix)]
pub use stub::StubTool;
pub use tree::SourceTree;

/// One megabyte, in bytes.
pub const MB: u64 = 1024 * 1024;
