//! Storage API the filter consumes.
//!
//! Mirrors the host's memory table: insert, get by id, delete by id, list by
//! user. There is no update; updates are delete + insert at the service layer.

use std::sync::Arc;

use async_trait::async_trait;
use automem_core::StoredMemory;

use crate::StorageError;

/// User-scoped memory records.
#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// Insert a new record owned by `user_id`. The store assigns id and timestamps.
    async fn insert(&self, user_id: &str, content: &str) -> Result<StoredMemory, StorageError>;

    /// Get a record by id.
    async fn get_by_id(&self, id: &str) -> Result<Option<StoredMemory>, StorageError>;

    /// Delete a record by id. Returns `true` if a record was removed.
    async fn delete_by_id(&self, id: &str) -> Result<bool, StorageError>;

    /// All records of a user, oldest first.
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<StoredMemory>, StorageError>;
}

#[async_trait]
impl<T: MemoryStore + ?Sized> MemoryStore for Arc<T> {
    async fn insert(&self, user_id: &str, content: &str) -> Result<StoredMemory, StorageError> {
        (**self).insert(user_id, content).await
    }
    async fn get_by_id(&self, id: &str) -> Result<Option<StoredMemory>, StorageError> {
        (**self).get_by_id(id).await
    }
    async fn delete_by_id(&self, id: &str) -> Result<bool, StorageError> {
        (**self).delete_by_id(id).await
    }
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<StoredMemory>, StorageError> {
        (**self).list_by_user(user_id).await
    }
}
