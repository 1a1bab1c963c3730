//! Command error types

use armctl_common::ManagementError;
use thiserror::Error;

/// Errors that terminate a single command invocation
#[derive(Debug, Error)]
pub enum CommandError {
    /// Parameters failed validation; nothing was sent to the service
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The management service reported a failure
    #[error(transparent)]
    RemoteOperationFailed(#[from] ManagementError),

    /// An aggregated failure that did not carry exactly one cause
    #[error("remote call returned {count} aggregated failures where one was expected: {summary}")]
    UnexpectedAggregate { count: usize, summary: String },

    /// Writing records to the output stream failed
    #[error("failed to write output: {0}")]
    Output(String),
}

/// Result type for command execution
pub type CommandResult<T> = Result<T, CommandError>;

impl CommandError {
    pub fn invalid(message: impl Into<String>) -> Self {
        CommandError::InvalidArgument(message.into())
    }
}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        CommandError::Output(err.to_string())
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(err: serde_json::Error) -> Self {
        CommandError::Output(err.to_string())
    }
}

impl From<serde_yaml::Error> for CommandError {
    fn from(err: serde_yaml::Error) -> Self {
        CommandError::Output(err.to_string())
    }
}
