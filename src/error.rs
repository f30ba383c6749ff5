use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the tracking core. None of these are fatal: the user
/// can always correct the input or retry the action.
#[derive(Debug, Error)]
pub enum TrackError {
    /// User input out of range or unparseable. Nothing was mutated.
    #[error("{0}")]
    Validation(String),

    /// Reading or writing one of the data files failed. In-memory state
    /// keeps its last good value.
    #[error("failed to access {}: {source}", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A backup was requested before any log file exists.
    #[error("No logs to export yet")]
    NothingToExport,
}

impl TrackError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Persistence {
            path: path.into(),
            source,
        }
    }
}
