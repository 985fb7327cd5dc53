//! Error types for fluxview-store.

use std::path::PathBuf;

use time::Date;

/// Result type for fluxview-store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in fluxview-store.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No date with data exists after the requested one.
    #[error("No data batch found after {after}")]
    NextBatchNotFound { after: Date },

    /// No date with data exists before the requested one.
    #[error("No data batch found before {before}")]
    PrevBatchNotFound { before: Date },

    /// The store was used outside an open/close bracket.
    #[error("Storage is not open")]
    NotOpen,

    /// A ranged batch was requested with a batch size of zero.
    #[error("Invalid batch size: {0} (must be at least 1)")]
    InvalidBatchSize(usize),

    /// Database error from SQLite.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The database was written by a newer release with an unknown layout.
    #[error("Unsupported schema version {found} (this build understands up to {supported})")]
    UnsupportedSchema { found: i32, supported: i32 },

    /// Failed to create database directory.
    #[error("Failed to create database directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Invalid timestamp.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error reports that date navigation ran out of data,
    /// as opposed to a failure of the store itself.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::NextBatchNotFound { .. } | Error::PrevBatchNotFound { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_navigation_errors_are_not_found() {
        let next = Error::NextBatchNotFound {
            after: date!(2022 - 01 - 17),
        };
        let prev = Error::PrevBatchNotFound {
            before: date!(2022 - 01 - 12),
        };
        assert!(next.is_not_found());
        assert!(prev.is_not_found());
        assert!(next.to_string().contains("2022-01-17"));
    }

    #[test]
    fn test_other_errors_are_not_not_found() {
        assert!(!Error::NotOpen.is_not_found());
        assert!(!Error::InvalidBatchSize(0).is_not_found());
    }
}
