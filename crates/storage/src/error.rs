//! Typed error enum for the storage layer.

use thiserror::Error;

/// Storage-layer error with variants covering every expected failure mode.
#[derive(Debug, Error)]
pub enum StorageError {
    /// SQL / connection failure.
    #[error("database error: {0}")]
    Database(String),

    /// Database is busy or locked by another writer.
    #[error("database busy: {0}")]
    Busy(String),

    /// Could not check out a pooled connection.
    #[error("connection pool error: {0}")]
    Pool(String),

    /// Blocking task failed to complete.
    #[error("blocking task failed: {0}")]
    Join(String),

    /// Migration failure.
    #[error("migration error: {0}")]
    Migration(String),

    /// Backend refused the write (read-only stores, test doubles).
    #[error("write rejected: {0}")]
    Rejected(String),
}

impl StorageError {
    /// Whether this error is likely transient (worth retrying).
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Busy(_) | Self::Pool(_) | Self::Join(_))
    }
}

/// Custom `From<rusqlite::Error>`: busy/locked failures become `Busy`,
/// everything else `Database`.
#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _)
                if matches!(
                    e.code,
                    rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
                ) =>
            {
                Self::Busy(err.to_string())
            },
            _ => Self::Database(err.to_string()),
        }
    }
}

#[cfg(feature = "sqlite")]
impl From<r2d2::Error> for StorageError {
    fn from(err: r2d2::Error) -> Self {
        Self::Pool(err.to_string())
    }
}
