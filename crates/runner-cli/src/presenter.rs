//! Terminal presentation of a run

use std::io::{self, IsTerminal, Write};

use colored::Colorize;
use runner_core::{InvocationSettings, Presenter, RunOutcome};

const APP_TITLE: &str = "sync-runner";

/// Prints progress and failures to the terminal and keeps the window title
/// pointing at the folder being synced.
///
/// Window sizing and minimizing have no portable equivalent and are skipped.
#[derive(Debug, Clone, Copy)]
pub struct TerminalPresenter {
    pause: bool,
}

impl TerminalPresenter {
    pub fn new(pause: bool) -> Self {
        Self { pause }
    }

    /// Block until the user presses Enter, if pausing was requested.
    pub fn pause(&self) {
        if !self.pause {
            return;
        }
        print!("--- Press Enter to exit ---");
        let _ = io::stdout().flush();
        let mut line = String::new();
        let _ = io::stdin().read_line(&mut line);
    }

    fn set_title(&self, title: &str) {
        let mut stdout = io::stdout();
        if stdout.is_terminal() {
            // OSC 0: set icon name and window title
            let _ = write!(stdout, "\x1b]0;{title}\x07");
            let _ = stdout.flush();
        }
    }
}

impl Presenter for TerminalPresenter {
    fn on_start(&self) {
        self.set_title(APP_TITLE);
    }

    fn on_run_start(&self, settings: &InvocationSettings) {
        self.set_title(&format!(
            "{} - {APP_TITLE}",
            settings.sync_from_path().display()
        ));
    }

    fn message(&self, text: &str) {
        println!("{}", text.green());
    }

    fn warning(&self, text: &str) {
        eprintln!("{}", text.red().bold());
    }

    fn on_finish(&self, outcome: &RunOutcome) {
        if let RunOutcome::Failed { reason, .. } = outcome {
            eprintln!("{reason}");
        }
    }
}
