//! In-process memory store.
//!
//! Records live in insertion order behind a `tokio::sync::RwLock`; data is lost
//! on restart. Used by tests and by embedders that keep memories elsewhere.

use std::sync::Arc;

use async_trait::async_trait;
use automem_core::StoredMemory;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{MemoryStore, StorageError};

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    records: Arc<RwLock<Vec<StoredMemory>>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record with a caller-chosen id, bypassing id generation.
    pub async fn seed(&self, id: &str, user_id: &str, content: &str) -> StoredMemory {
        let now = Utc::now().timestamp();
        let record = StoredMemory {
            id: id.to_owned(),
            user_id: user_id.to_owned(),
            content: content.to_owned(),
            created_at: now,
            updated_at: now,
        };
        let mut records = self.records.write().await;
        records.retain(|r| r.id != id);
        records.push(record.clone());
        record
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Snapshot of every record, all users.
    pub async fn all(&self) -> Vec<StoredMemory> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl MemoryStore for InMemoryStore {
    async fn insert(&self, user_id: &str, content: &str) -> Result<StoredMemory, StorageError> {
        let now = Utc::now().timestamp();
        let record = StoredMemory {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_owned(),
            content: content.to_owned(),
            created_at: now,
            updated_at: now,
        };
        self.records.write().await.push(record.clone());
        tracing::debug!(memory_id = %record.id, user_id, "inserted memory");
        Ok(record)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<StoredMemory>, StorageError> {
        Ok(self.records.read().await.iter().find(|r| r.id == id).cloned())
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, StorageError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() != before)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<StoredMemory>, StorageError> {
        Ok(self.records.read().await.iter().filter(|r| r.user_id == user_id).cloned().collect())
    }
}
