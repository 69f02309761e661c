//! Console presentation hooks
//!
//! The orchestrator reports progress through a [`Presenter`] instead of
//! printing, so the binary can style the terminal and library callers can
//! stay silent.

use crate::orchestrator::RunOutcome;
use crate::settings::InvocationSettings;

/// Lifecycle hooks for user-facing output. Every hook defaults to a no-op.
pub trait Presenter {
    /// Process start, before arguments are interpreted.
    fn on_start(&self) {}

    /// Settings are valid and the pipeline is about to run.
    fn on_run_start(&self, _settings: &InvocationSettings) {}

    /// The usage guide is about to be shown.
    fn on_help(&self) {}

    /// Progress line, such as a completed stage.
    fn message(&self, _text: &str) {}

    /// Failure banner, emitted before `on_finish` when a run fails.
    fn warning(&self, _text: &str) {}

    /// The pipeline reached `Done` or `Failed`.
    fn on_finish(&self, _outcome: &RunOutcome) {}
}

/// Presenter that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuietPresenter;

impl Presenter for QuietPresenter {}
