//! Run settings built from positional arguments
//!
//! Positional order is fixed:
//!
//! 1. directory checked by the size guard
//! 2. sync tool executable
//! 3. raw tool flags
//! 4. tool source argument
//! 5. tool destination argument
//! 6. transfer log path (optional, paired with 7)
//! 7. clean log path (optional, paired with 6)

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Number of positional arguments a run needs.
pub const REQUIRED_ARGS: usize = 5;

/// Number of positional arguments when log cleanup is requested.
pub const MAX_ARGS: usize = REQUIRED_ARGS + 2;

/// Transfer log and clean log, always supplied together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogPaths {
    /// Log written by the sync tool; emptied after each cleanup
    pub tool_log: PathBuf,
    /// Cumulative log of deletion records
    pub clean_log: PathBuf,
}

/// Validated, immutable settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationSettings {
    sync_from_path: PathBuf,
    tool_executable_path: PathBuf,
    tool_flags: String,
    from_path: String,
    to_path: String,
    log_paths: Option<LogPaths>,
}

impl InvocationSettings {
    /// Settings for a run without log cleanup.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if any path is empty, or if the
    /// flags cannot be split into arguments. The flags may be empty.
    pub fn new(
        sync_from_path: impl Into<PathBuf>,
        tool_executable_path: impl Into<PathBuf>,
        tool_flags: impl Into<String>,
        from_path: impl Into<String>,
        to_path: impl Into<String>,
    ) -> Result<Self> {
        let settings = Self {
            sync_from_path: sync_from_path.into(),
            tool_executable_path: tool_executable_path.into(),
            tool_flags: tool_flags.into(),
            from_path: from_path.into(),
            to_path: to_path.into(),
            log_paths: None,
        };

        require_path("sync-from path", &settings.sync_from_path)?;
        require_path("tool executable path", &settings.tool_executable_path)?;
        require("tool source path", &settings.from_path)?;
        require("tool destination path", &settings.to_path)?;

        #[cfg(not(windows))]
        crate::invoker::split_flags(&settings.tool_flags)?;

        Ok(settings)
    }

    /// Enable log cleanup with the given transfer and clean logs.
    pub fn with_log_paths(
        mut self,
        tool_log: impl Into<PathBuf>,
        clean_log: impl Into<PathBuf>,
    ) -> Result<Self> {
        let paths = LogPaths {
            tool_log: tool_log.into(),
            clean_log: clean_log.into(),
        };
        require_path("transfer log path", &paths.tool_log)?;
        require_path("clean log path", &paths.clean_log)?;

        self.log_paths = Some(paths);
        Ok(self)
    }

    /// Build settings from positional arguments.
    ///
    /// Exactly [`REQUIRED_ARGS`] arguments run without log cleanup and
    /// exactly [`MAX_ARGS`] run with it. Any other count is rejected, since
    /// a lone transfer log has no clean log to move its records into.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        match args.len() {
            n if n < REQUIRED_ARGS => Err(Error::configuration(format!(
                "expected at least {REQUIRED_ARGS} arguments, got {n}"
            ))),
            REQUIRED_ARGS | MAX_ARGS => {
                let arg = |i: usize| args[i].as_ref();
                let settings = Self::new(arg(0), arg(1), arg(2), arg(3), arg(4))?;
                if args.len() == MAX_ARGS {
                    settings.with_log_paths(arg(5), arg(6))
                } else {
                    Ok(settings)
                }
            }
            n if n == REQUIRED_ARGS + 1 => Err(Error::configuration(
                "a transfer log path was given without a clean log path; both are required for log cleanup",
            )),
            n => Err(Error::configuration(format!(
                "expected at most {MAX_ARGS} arguments, got {n}"
            ))),
        }
    }

    pub fn sync_from_path(&self) -> &Path {
        &self.sync_from_path
    }

    pub fn tool_executable_path(&self) -> &Path {
        &self.tool_executable_path
    }

    pub fn tool_flags(&self) -> &str {
        &self.tool_flags
    }

    pub fn from_path(&self) -> &str {
        &self.from_path
    }

    pub fn to_path(&self) -> &str {
        &self.to_path
    }

    /// Log paths, present only when cleanup was requested.
    pub fn log_paths(&self) -> Option<&LogPaths> {
        self.log_paths.as_ref()
    }
}

fn require(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::configuration(format!("{name} must not be empty")));
    }
    Ok(())
}

fn require_path(name: &str, value: &Path) -> Result<()> {
    require(name, &value.to_string_lossy())
}
