//! Sync tool invocation
//!
//! The tool runs as `<executable> <flags> "<from>" "<to>"` with the console
//! inherited, so its progress output goes straight to the user. There is no
//! timeout; a hung transfer is the tool's problem.

use std::fmt;
use std::path::Path;
use std::process::Command;

use crate::{Error, Result};

/// Exit code the sync tool reports on success.
pub const TOOL_SUCCESS_CODE: i32 = 0;

/// How the sync tool exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvocationResult {
    /// Exit code, or `None` if the tool was killed by a signal
    pub exit_code: Option<i32>,
}

impl InvocationResult {
    pub fn success(&self) -> bool {
        self.exit_code == Some(TOOL_SUCCESS_CODE)
    }
}

impl fmt::Display for InvocationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.exit_code {
            Some(code) => write!(f, "exit code {code}"),
            None => write!(f, "terminated by signal"),
        }
    }
}

/// Launches the sync tool and waits for it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncInvoker;

impl SyncInvoker {
    pub fn new() -> Self {
        Self
    }

    /// Run the tool to completion and return its exit status.
    ///
    /// A non-zero exit code is returned as data, not as an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Launch`] if the process cannot be started, and
    /// [`Error::Configuration`] if `flags` cannot be split into arguments.
    pub fn run(
        &self,
        executable: &Path,
        flags: &str,
        to_arg: &str,
        from_arg: &str,
    ) -> Result<InvocationResult> {
        let mut command = self.command(executable, flags, to_arg, from_arg)?;
        tracing::info!(program = %executable.display(), "Launching sync tool");
        tracing::debug!(command = ?command, "Sync tool command line");

        let status = command.status().map_err(|source| {
            tracing::error!(program = %executable.display(), error = %source, "Sync tool failed to start");
            Error::Launch {
                program: executable.to_path_buf(),
                source,
            }
        })?;

        let result = InvocationResult {
            exit_code: status.code(),
        };
        tracing::info!(result = %result, "Sync tool exited");

        Ok(result)
    }

    /// Assemble the command line without running it.
    ///
    /// On Windows the flags and quoted paths are passed through as raw
    /// command-line text, exactly as written. Elsewhere the flags are split
    /// with POSIX shell rules and each path is a single argument.
    pub fn command(
        &self,
        executable: &Path,
        flags: &str,
        to_arg: &str,
        from_arg: &str,
    ) -> Result<Command> {
        let mut command = Command::new(executable);

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;

            if !flags.trim().is_empty() {
                command.raw_arg(flags);
            }
            command
                .raw_arg(format!("\"{from_arg}\""))
                .raw_arg(format!("\"{to_arg}\""));
        }

        #[cfg(not(windows))]
        {
            command.args(split_flags(flags)?).arg(from_arg).arg(to_arg);
        }

        Ok(command)
    }
}

/// Split tool flags with POSIX shell rules.
#[cfg(not(windows))]
pub(crate) fn split_flags(flags: &str) -> Result<Vec<String>> {
    shlex::split(flags)
        .ok_or_else(|| Error::configuration(format!("tool flags have unbalanced quotes: {flags}")))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    fn args_of(command: &Command) -> Vec<&OsStr> {
        command.get_args().collect()
    }

    #[test]
    fn flags_are_split_before_paths() {
        let command = SyncInvoker::new()
            .command(
                Path::new("/usr/bin/rsync"),
                "-arv --filter='. /music/rules.txt' --delete-before",
                "nas:/Music/",
                "/My Music",
            )
            .unwrap();

        assert_eq!(command.get_program(), "/usr/bin/rsync");
        assert_eq!(
            args_of(&command),
            vec![
                "-arv",
                "--filter=. /music/rules.txt",
                "--delete-before",
                "/My Music",
                "nas:/Music/",
            ]
        );
    }

    #[test]
    fn empty_flags_pass_only_paths() {
        let command = SyncInvoker::new()
            .command(Path::new("rsync"), "", "dst", "src")
            .unwrap();

        assert_eq!(args_of(&command), vec!["src", "dst"]);
    }

    #[test]
    fn split_flags_honors_quotes() {
        assert_eq!(
            split_flags(r#"-a "--exclude=My Files""#).unwrap(),
            vec!["-a", "--exclude=My Files"]
        );
        assert!(split_flags("  ").unwrap().is_empty());
    }

    #[test]
    fn unbalanced_quotes_are_rejected() {
        let result = SyncInvoker::new().command(Path::new("rsync"), "--filter='oops", "dst", "src");

        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn result_success_only_on_zero() {
        assert!(InvocationResult { exit_code: Some(0) }.success());
        assert!(!InvocationResult { exit_code: Some(1) }.success());
        assert!(!InvocationResult { exit_code: None }.success());
    }
}
