//! Store error types.

use sixtick_types::SixtickError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to create the directory holding the database.
    #[error("Failed to create directory '{path}': {source}")]
    CreateDir {
        /// The path that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to open the database.
    #[error("Failed to open database '{path}': {source}")]
    Open {
        /// The database path.
        path: PathBuf,
        /// The underlying driver error.
        source: rusqlite::Error,
    },

    /// A query failed.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The symbol or ISIN is already on the watchlist.
    #[error("Security {0} is already on the watchlist.")]
    AlreadyTracked(String),

    /// A stored timestamp is outside the representable range.
    #[error("Stored timestamp {0} is out of range")]
    CorruptTimestamp(i64),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

impl From<StoreError> for SixtickError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AlreadyTracked(id) => Self::AlreadyTracked(id),
            other => Self::Store(other.to_string()),
        }
    }
}
