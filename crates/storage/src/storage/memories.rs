use automem_core::StoredMemory;
use chrono::Utc;
use rusqlite::{OptionalExtension as _, params};
use uuid::Uuid;

use super::{Storage, get_conn, log_row_error};
use crate::StorageError;

const SELECT_COLUMNS: &str = "SELECT id, user_id, content, created_at, updated_at FROM memories";

fn row_to_memory(row: &rusqlite::Row<'_>) -> rusqlite::Result<StoredMemory> {
    Ok(StoredMemory {
        id: row.get(0)?,
        user_id: row.get(1)?,
        content: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

impl Storage {
    /// Insert a memory for a user.
    ///
    /// # Errors
    /// Returns error if database insert fails.
    pub fn insert_memory(&self, user_id: &str, content: &str) -> Result<StoredMemory, StorageError> {
        let conn = get_conn(&self.pool)?;
        let now = Utc::now().timestamp();
        let memory = StoredMemory {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_owned(),
            content: content.to_owned(),
            created_at: now,
            updated_at: now,
        };
        conn.execute(
            "INSERT INTO memories (id, user_id, content, created_at, updated_at)
               VALUES (?1, ?2, ?3, ?4, ?5)",
            params![memory.id, memory.user_id, memory.content, memory.created_at, memory.updated_at],
        )?;
        Ok(memory)
    }

    /// Get memory by ID.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn get_memory(&self, id: &str) -> Result<Option<StoredMemory>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} WHERE id = ?1"))?;
        Ok(stmt.query_row(params![id], row_to_memory).optional()?)
    }

    /// Delete memory by ID. Returns `true` if a row was deleted.
    ///
    /// # Errors
    /// Returns error if database delete fails.
    pub fn delete_memory(&self, id: &str) -> Result<bool, StorageError> {
        let conn = get_conn(&self.pool)?;
        let deleted = conn.execute("DELETE FROM memories WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }

    /// All memories of a user, oldest first.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn list_user_memories(&self, user_id: &str) -> Result<Vec<StoredMemory>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let mut stmt =
            conn.prepare(&format!("{SELECT_COLUMNS} WHERE user_id = ?1 ORDER BY created_at, rowid"))?;
        let rows = stmt.query_map(params![user_id], row_to_memory)?;
        Ok(rows.filter_map(log_row_error).collect())
    }
}
