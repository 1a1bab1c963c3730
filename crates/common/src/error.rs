//! Error types shared across the workspace

use std::path::PathBuf;
use thiserror::Error;

/// Failure reported by a management API call
#[derive(Debug, Error)]
pub enum ManagementError {
    /// The addressed resource does not exist
    #[error("resource not found: {0}")]
    NotFound(String),

    /// The service answered with a non-success status
    #[error("management API error ({status}): {code}: {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// The request never produced a response
    #[error("request failed: {0}")]
    Transport(String),

    /// The response body did not match the expected shape
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Several failures collected from asynchronous execution.
    ///
    /// Callers are expected to unwrap this down to the single cause it
    /// normally carries; see [`ManagementError::flatten`].
    #[error("one or more errors occurred ({} inner)", .0.len())]
    Aggregate(Vec<ManagementError>),
}

impl ManagementError {
    /// Flatten nested aggregates into the list of leaf causes.
    ///
    /// A non-aggregate error flattens to a single-element list containing itself.
    pub fn flatten(self) -> Vec<ManagementError> {
        match self {
            ManagementError::Aggregate(inner) => {
                inner.into_iter().flat_map(ManagementError::flatten).collect()
            }
            other => vec![other],
        }
    }

    /// Whether this is a 404-style failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, ManagementError::NotFound(_))
    }
}

impl From<reqwest::Error> for ManagementError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ManagementError::Decode(err.to_string())
        } else {
            ManagementError::Transport(err.to_string())
        }
    }
}

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("missing required setting: {0}")]
    Missing(&'static str),
}
