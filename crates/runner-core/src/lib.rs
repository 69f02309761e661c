//! Guarded sync pipeline for sync-runner
//!
//! Sequences the three stages of a run on top of `runner-fs`:
//!
//! - **Size check**: refuse to sync a source that looks unmounted or empty
//! - **Sync**: run the external tool and interpret its exit code
//! - **Log cleanup**: move deletion records into the clean log
//!
//! ```text
//!        runner-cli
//!            |
//!       runner-core
//!            |
//!        runner-fs
//! ```
//!
//! # Example
//!
//! ```no_run
//! use runner_core::{InvocationSettings, Orchestrator};
//!
//! let args = ["/music", "/usr/bin/rsync", "-a --delete", "/music/", "nas:/music/"];
//! let settings = InvocationSettings::from_args(&args).unwrap();
//! let outcome = Orchestrator::new(settings).run();
//! std::process::exit(outcome.exit_code());
//! ```

pub mod error;
pub mod invoker;
pub mod orchestrator;
pub mod presenter;
pub mod settings;

pub use error::{Error, Result};
pub use invoker::{InvocationResult, SyncInvoker, TOOL_SUCCESS_CODE};
pub use orchestrator::{
    DEFAULT_SETTLE_DELAY, FailureReason, Orchestrator, OrchestratorOptions, RunOutcome, RunReport,
    Stage,
};
pub use presenter::{Presenter, QuietPresenter};
pub use settings::{InvocationSettings, LogPaths, MAX_ARGS, REQUIRED_ARGS};
