//! Run orchestration
//!
//! A run moves through a fixed sequence of stages and stops at the first
//! failure:
//!
//! ```text
//! Start -> SizeCheck -> Syncing -> LogCleanup -> Done
//!              |           |            |
//!              +-----------+------------+--> Failed
//! ```
//!
//! `Syncing` goes straight to `Done` when no log paths were given. Every
//! failure is reported as a [`RunOutcome::Failed`] value carrying the stage
//! it happened in; nothing is retried.

use std::fmt;
use std::thread;
use std::time::Duration;

use runner_fs::{LogReconciler, ReconcileReport, SizeGuard, SizeVerdict};

use crate::invoker::{InvocationResult, SyncInvoker};
use crate::presenter::{Presenter, QuietPresenter};
use crate::settings::InvocationSettings;
use crate::Error;

/// Default pause before log cleanup.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(3);

/// Pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Start,
    SizeCheck,
    Syncing,
    LogCleanup,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::SizeCheck => write!(f, "size-check"),
            Self::Syncing => write!(f, "syncing"),
            Self::LogCleanup => write!(f, "log-cleanup"),
            Self::Done => write!(f, "done"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Why a run ended in `Failed`.
#[derive(Debug)]
pub enum FailureReason {
    /// The source directory could not be measured
    SourceUnreadable(runner_fs::Error),
    /// The source directory is at or below the size threshold
    FolderTooSmall(SizeVerdict),
    /// The sync tool could not be started
    LaunchFailed(Error),
    /// The sync tool exited with a non-success code
    AbnormalExit(InvocationResult),
    /// The transfer log could not be reconciled
    LogCleanupFailed(runner_fs::Error),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceUnreadable(e) => write!(f, "cannot measure source folder: {e}"),
            Self::FolderTooSmall(verdict) => write!(
                f,
                "folder too small: {} KB measured, more than {} KB required",
                verdict.measured_kb(),
                verdict.threshold_kb
            ),
            Self::LaunchFailed(e) => write!(f, "sync tool could not be launched: {e}"),
            Self::AbnormalExit(result) => write!(f, "sync tool exited abnormally ({result})"),
            Self::LogCleanupFailed(e) => write!(f, "log cleanup failed: {e}"),
        }
    }
}

impl FailureReason {
    /// One-line banner text shown to the user.
    pub fn headline(&self) -> &'static str {
        match self {
            Self::SourceUnreadable(_) => "The source folder could not be read",
            Self::FolderTooSmall(_) => "Warning: The folder is ~< 4 MB",
            Self::LaunchFailed(_) => "The sync tool could not be launched",
            Self::AbnormalExit(_) => "The sync tool exited abnormally",
            Self::LogCleanupFailed(_) => "Log cleanup failed",
        }
    }
}

/// Everything a run produced before it stopped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Stages entered, in order
    pub trace: Vec<Stage>,
    pub verdict: Option<SizeVerdict>,
    pub invocation: Option<InvocationResult>,
    pub reconciliation: Option<ReconcileReport>,
}

/// Terminal state of a run.
#[derive(Debug)]
pub enum RunOutcome {
    Done(RunReport),
    Failed {
        stage: Stage,
        reason: FailureReason,
        report: RunReport,
    },
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    /// Process exit code: 0 for `Done`, 1 for `Failed`.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() { 0 } else { 1 }
    }

    pub fn report(&self) -> &RunReport {
        match self {
            Self::Done(report) => report,
            Self::Failed { report, .. } => report,
        }
    }

    /// Stage the run failed in, if it failed.
    pub fn failed_stage(&self) -> Option<Stage> {
        match self {
            Self::Done(_) => None,
            Self::Failed { stage, .. } => Some(*stage),
        }
    }
}

/// Tunables for [`Orchestrator`].
#[derive(Debug, Clone)]
pub struct OrchestratorOptions {
    /// Pause between a successful sync and log cleanup, giving the tool
    /// time to release its log file. A heuristic, not a guarantee.
    pub settle_delay: Duration,
    pub guard: SizeGuard,
}

impl Default for OrchestratorOptions {
    fn default() -> Self {
        Self {
            settle_delay: DEFAULT_SETTLE_DELAY,
            guard: SizeGuard::new(),
        }
    }
}

/// Runs the guarded sync pipeline for one set of settings.
pub struct Orchestrator {
    settings: InvocationSettings,
    options: OrchestratorOptions,
    invoker: SyncInvoker,
    reconciler: LogReconciler,
    presenter: Box<dyn Presenter>,
}

impl Orchestrator {
    pub fn new(settings: InvocationSettings) -> Self {
        Self {
            settings,
            options: OrchestratorOptions::default(),
            invoker: SyncInvoker::new(),
            reconciler: LogReconciler::new(),
            presenter: Box::new(QuietPresenter),
        }
    }

    pub fn with_options(mut self, options: OrchestratorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_presenter(mut self, presenter: Box<dyn Presenter>) -> Self {
        self.presenter = presenter;
        self
    }

    pub fn settings(&self) -> &InvocationSettings {
        &self.settings
    }

    /// Run every stage until `Done` or the first failure.
    pub fn run(&self) -> RunOutcome {
        self.presenter.on_run_start(&self.settings);

        let mut report = RunReport::default();
        enter(&mut report, Stage::Start);

        let outcome = match self.stages(&mut report) {
            Ok(()) => {
                enter(&mut report, Stage::Done);
                RunOutcome::Done(report)
            }
            Err((stage, reason)) => {
                tracing::warn!(stage = %stage, reason = %reason, "Run failed");
                self.presenter.warning(&format!("*** {} ***", reason.headline()));
                enter(&mut report, Stage::Failed);
                RunOutcome::Failed {
                    stage,
                    reason,
                    report,
                }
            }
        };

        self.presenter.on_finish(&outcome);
        outcome
    }

    fn stages(&self, report: &mut RunReport) -> Result<(), (Stage, FailureReason)> {
        let settings = &self.settings;

        enter(report, Stage::SizeCheck);
        let verdict = self
            .options
            .guard
            .verify(settings.sync_from_path())
            .map_err(|e| (Stage::SizeCheck, FailureReason::SourceUnreadable(e)))?;
        report.verdict = Some(verdict);
        if !verdict.passed() {
            return Err((Stage::SizeCheck, FailureReason::FolderTooSmall(verdict)));
        }

        enter(report, Stage::Syncing);
        let result = self
            .invoker
            .run(
                settings.tool_executable_path(),
                settings.tool_flags(),
                settings.to_path(),
                settings.from_path(),
            )
            .map_err(|e| (Stage::Syncing, FailureReason::LaunchFailed(e)))?;
        report.invocation = Some(result);
        if !result.success() {
            return Err((Stage::Syncing, FailureReason::AbnormalExit(result)));
        }
        self.presenter.message("--- Copy Complete ---");

        let Some(logs) = settings.log_paths() else {
            tracing::debug!("No log paths given; skipping log cleanup");
            return Ok(());
        };

        enter(report, Stage::LogCleanup);
        if !self.options.settle_delay.is_zero() {
            tracing::debug!(delay = ?self.options.settle_delay, "Waiting for the sync tool to release its log");
            thread::sleep(self.options.settle_delay);
        }
        let reconciled = self
            .reconciler
            .reconcile(&logs.tool_log, &logs.clean_log)
            .map_err(|e| (Stage::LogCleanup, FailureReason::LogCleanupFailed(e)))?;
        report.reconciliation = Some(reconciled);
        self.presenter.message("--- Log Cleanup Complete ---");

        Ok(())
    }
}

fn enter(report: &mut RunReport, stage: Stage) {
    tracing::info!(stage = %stage, "Entering stage");
    report.trace.push(stage);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_follows_outcome() {
        let done = RunOutcome::Done(RunReport::default());
        assert_eq!(done.exit_code(), 0);
        assert_eq!(done.failed_stage(), None);

        let failed = RunOutcome::Failed {
            stage: Stage::SizeCheck,
            reason: FailureReason::FolderTooSmall(SizeVerdict::closed(4096)),
            report: RunReport::default(),
        };
        assert_eq!(failed.exit_code(), 1);
        assert_eq!(failed.failed_stage(), Some(Stage::SizeCheck));
    }

    #[test]
    fn folder_too_small_reason_mentions_sizes() {
        let reason = FailureReason::FolderTooSmall(SizeVerdict {
            threshold_kb: 4096,
            shallow_kb: 10,
            recursive_kb: Some(12),
        });
        assert_eq!(
            reason.to_string(),
            "folder too small: 12 KB measured, more than 4096 KB required"
        );
    }

    #[test]
    fn abnormal_exit_reason_mentions_code() {
        let reason = FailureReason::AbnormalExit(InvocationResult { exit_code: Some(23) });
        assert_eq!(reason.to_string(), "sync tool exited abnormally (exit code 23)");
        assert_eq!(reason.headline(), "The sync tool exited abnormally");
    }

    #[test]
    fn missing_source_fails_at_size_check() {
        let temp = tempfile::tempdir().unwrap();
        let settings = InvocationSettings::new(
            temp.path().join("unmounted"),
            "rsync",
            "-a",
            "src",
            "dst",
        )
        .unwrap();

        let outcome = Orchestrator::new(settings).run();

        assert_eq!(outcome.failed_stage(), Some(Stage::SizeCheck));
        assert_eq!(
            outcome.report().trace,
            vec![Stage::Start, Stage::SizeCheck, Stage::Failed]
        );
        assert!(matches!(
            outcome,
            RunOutcome::Failed {
                reason: FailureReason::SourceUnreadable(_),
                ..
            }
        ));
    }
}
