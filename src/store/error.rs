//! Store Errors
//!
//! Error types for allow-list persistence.

use std::path::PathBuf;

/// Errors that can occur while persisting the allow-list
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Writing or renaming the state file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
