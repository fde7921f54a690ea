//! Error types for the scene switcher

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the switcher and its hosts
#[derive(Debug, Error)]
pub enum SwitcherError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse package manifest {path}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot open scene '{path}': {reason}")]
    OpenScene { path: String, reason: String },

    #[error("configuration error: {0}")]
    Config(String),
}

impl SwitcherError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SwitcherError>;
