//! [`StubTool`] shell scripts that stand in for the sync tool.
//!
//! Unix only: the stub is a `/bin/sh` script marked executable.

use std::fs;
use std::path::{Path, PathBuf};

/// Builder for an executable script with a fixed exit code.
///
/// # Example
///
/// ```rust,no_run
/// use runner_test_utils::StubTool;
///
/// let dir = tempfile::tempdir().unwrap();
/// let tool = StubTool::exiting(0)
///     .appending_log(dir.path().join("sync.log"), &["deleting a.txt"])
///     .build(dir.path());
/// assert!(tool.exists());
/// ```
#[derive(Debug, Clone)]
pub struct StubTool {
    exit_code: i32,
    log: Option<(PathBuf, Vec<String>)>,
    args_file: Option<PathBuf>,
}

impl StubTool {
    /// A stub that exits with `exit_code` and does nothing else.
    pub fn exiting(exit_code: i32) -> Self {
        Self {
            exit_code,
            log: None,
            args_file: None,
        }
    }

    /// Append `lines` to `log` when run, as a sync tool writing its log would.
    pub fn appending_log(mut self, log: impl Into<PathBuf>, lines: &[&str]) -> Self {
        self.log = Some((log.into(), lines.iter().map(|l| l.to_string()).collect()));
        self
    }

    /// Write each received argument on its own line to `file` when run.
    pub fn recording_args(mut self, file: impl Into<PathBuf>) -> Self {
        self.args_file = Some(file.into());
        self
    }

    /// Write the script into `dir` and return its path.
    pub fn build(&self, dir: &Path) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(format!("stub-tool-{}.sh", self.exit_code));
        fs::write(&path, self.script()).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn script(&self) -> String {
        let mut script = String::from("#!/bin/sh\n");

        if let Some(args_file) = &self.args_file {
            script.push_str(&format!(
                "printf '%s\\n' \"$@\" > {}\n",
                quote(args_file)
            ));
        }

        if let Some((log, lines)) = &self.log {
            for line in lines {
                script.push_str(&format!(
                    "printf '%s\\n' {} >> {}\n",
                    quote_str(line),
                    quote(log)
                ));
            }
        }

        script.push_str(&format!("exit {}\n", self.exit_code));
        script
    }
}

fn quote(path: &Path) -> String {
    quote_str(&path.to_string_lossy())
}

fn quote_str(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}
