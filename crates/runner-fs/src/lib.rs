//! Filesystem layer for sync-runner
//!
//! Provides the source-size heuristic that gates a sync run and the
//! transfer-log reconciliation that runs after it.

pub mod constants;
pub mod error;
pub mod reconcile;
pub mod size;

pub use error::{Error, Result};
pub use reconcile::{LogReconciler, ReconcileReport, is_deletion_line};
pub use size::{ExclusionPolicy, SizeGuard, SizeVerdict};
