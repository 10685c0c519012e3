use std::time::Duration;
use thiserror::Error;

/// Custom error types for avsync
#[derive(Error, Debug)]
pub enum AvSyncError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to start {0}: {1}")]
    CommandStart(String, #[source] std::io::Error),

    #[error("{program} exited with status {code}: {stderr}")]
    CommandFailed {
        program: String,
        code: i32,
        stderr: String,
    },

    #[error("{0} timed out after {1:?}")]
    Timeout(String, Duration),

    #[error("Failed to parse {0} output: {1}")]
    JsonParse(String, #[source] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type for avsync operations
pub type Result<T> = std::result::Result<T, AvSyncError>;

impl AvSyncError {
    /// Text shown to the user for a failed probe.
    ///
    /// A non-zero exit surfaces ffprobe's own stderr, the way it would appear
    /// in a terminal; everything else uses the error's display form.
    pub fn user_message(&self) -> String {
        match self {
            AvSyncError::CommandFailed { stderr, .. } => stderr.clone(),
            other => other.to_string(),
        }
    }
}
