use std::sync::Arc;

use automem_core::{StoredMemory, TaggedMemory, format_tagged_content, normalize_tags};
use automem_storage::MemoryStore;

use crate::ServiceError;

/// Direct access to a user's memories, outside of a chat turn.
pub struct MemoryService {
    store: Arc<dyn MemoryStore>,
}

impl MemoryService {
    #[must_use]
    pub fn new(store: Arc<dyn MemoryStore>) -> Self {
        Self { store }
    }

    /// All memories of `user_id`, oldest first, with tags split out.
    pub async fn list_tagged(&self, user_id: &str) -> Result<Vec<TaggedMemory>, ServiceError> {
        let user_id = non_empty(user_id, "user id")?;
        let records = self.store.list_by_user(user_id).await?;
        Ok(records.iter().map(TaggedMemory::from).collect())
    }

    /// Store `content` for `user_id` with the given tags.
    pub async fn add(
        &self,
        user_id: &str,
        content: &str,
        tags: &[String],
    ) -> Result<StoredMemory, ServiceError> {
        let user_id = non_empty(user_id, "user id")?;
        let content = non_empty(content, "content")?;
        let tags = normalize_tags(tags);
        let record = self.store.insert(user_id, &format_tagged_content(&tags, content)).await?;
        tracing::info!(user_id, memory_id = %record.id, "Added memory");
        Ok(record)
    }
}

fn non_empty<'a>(value: &'a str, what: &str) -> Result<&'a str, ServiceError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::InvalidInput(format!("{what} must not be empty")));
    }
    Ok(trimmed)
}
