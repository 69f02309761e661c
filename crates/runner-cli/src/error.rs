//! Error types for runner-cli

/// Exit code for missing or malformed arguments.
pub const USAGE_EXIT_CODE: i32 = 2;

/// Exit code for any other failure.
pub const FAILURE_EXIT_CODE: i32 = 1;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from runner-core
    #[error(transparent)]
    Core(#[from] runner_core::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Whether the usage guide should accompany this error.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Core(runner_core::Error::Configuration { .. }))
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_usage() {
            USAGE_EXIT_CODE
        } else {
            FAILURE_EXIT_CODE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_errors_are_usage_errors() {
        let error = CliError::from(runner_core::Error::configuration("six arguments"));
        assert!(error.is_usage());
        assert_eq!(error.exit_code(), USAGE_EXIT_CODE);
    }

    #[test]
    fn io_errors_are_failures() {
        let error = CliError::from(std::io::Error::other("broken pipe"));
        assert!(!error.is_usage());
        assert_eq!(error.exit_code(), FAILURE_EXIT_CODE);
    }
}
