//! Import error types.

use thiserror::Error;

/// Errors that can occur while fetching or loading catalog candidates.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The remote source answered with a non-success status.
    #[error("HTTP error from {source_name}: {status}")]
    Http { source_name: String, status: u16 },

    /// A response body could not be parsed.
    #[error("parse error from {source_name}: {message}")]
    Parse {
        source_name: String,
        message: String,
    },

    /// An error propagated from `reqwest`.
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    /// An error propagated from the catalog store.
    #[error("database error: {0}")]
    Database(#[from] bookstock_core::Error),
}

impl ImportError {
    /// Returns `true` when the failure came from the remote source rather
    /// than the local catalog.
    pub fn is_remote(&self) -> bool {
        !matches!(self, Self::Database(_))
    }
}

/// Convenience alias for import results.
pub type ImportResult<T> = std::result::Result<T, ImportError>;
