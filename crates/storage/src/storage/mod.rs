//! `SQLite` storage implementation.
//!
//! All methods are synchronous; `sqlite_async` wraps them for the async
//! `MemoryStore` trait.

mod memories;

use std::path::Path;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;

use crate::StorageError;
use crate::migrations;

/// Type alias for pooled connection
pub(crate) type PooledConn = PooledConnection<SqliteConnectionManager>;

const POOL_MAX_SIZE: u32 = 8;

/// Main storage struct wrapping `SQLite` connection pool
#[derive(Clone, Debug)]
pub struct Storage {
    pub(crate) pool: Pool<SqliteConnectionManager>,
}

/// Get a connection from the pool
pub(crate) fn get_conn(pool: &Pool<SqliteConnectionManager>) -> Result<PooledConn, StorageError> {
    pool.get().map_err(StorageError::from)
}

/// Log row read errors and filter them out
pub(crate) fn log_row_error<T>(result: rusqlite::Result<T>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!("Row read error: {}", e);
            None
        },
    }
}

impl Storage {
    /// Open (or create) the database at `db_path` and run migrations.
    ///
    /// # Errors
    /// Returns error if the pool cannot be built or a migration fails.
    pub fn new(db_path: &Path) -> Result<Self, StorageError> {
        let manager = SqliteConnectionManager::file(db_path)
            .with_init(|conn| conn.pragma_update(None, "busy_timeout", 5000i32));
        let pool = Pool::builder().max_size(POOL_MAX_SIZE).build(manager)?;

        let conn = get_conn(&pool)?;
        migrations::run_migrations(&conn)
            .map_err(|e| StorageError::Migration(e.to_string()))?;

        tracing::info!(path = %db_path.display(), "memory database ready");
        Ok(Self { pool })
    }
}
