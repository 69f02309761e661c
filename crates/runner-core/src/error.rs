//! Error types for runner-core

use std::path::PathBuf;

/// Result type for runner-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in runner-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Missing, extra or malformed arguments
    #[error("Invalid arguments: {message}")]
    Configuration { message: String },

    /// The sync tool could not be started
    #[error("Failed to launch {program}: {source}")]
    Launch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Filesystem error from runner-fs
    #[error(transparent)]
    Fs(#[from] runner_fs::Error),
}

impl Error {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
