//! Stored memory records and their parsed, tag-aware view.

use serde::{Deserialize, Serialize};

use crate::tags::parse_tagged_content;

/// A memory record as the store holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMemory {
    pub id: String,
    pub user_id: String,
    /// Free text, possibly carrying a `[Tags: ...]` prefix.
    pub content: String,
    /// Unix seconds.
    pub created_at: i64,
    /// Unix seconds.
    pub updated_at: i64,
}

/// A stored memory with its tags split out of the content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedMemory {
    pub id: String,
    /// Full stored content, prefix included.
    pub content: String,
    /// Content without the tags prefix.
    pub body: String,
    pub tags: Vec<String>,
}

impl TaggedMemory {
    #[must_use]
    pub fn from_stored(memory: &StoredMemory) -> Self {
        let (tags, body) = parse_tagged_content(&memory.content);
        Self { id: memory.id.clone(), content: memory.content.clone(), body: body.to_owned(), tags }
    }

    /// One `ID | Content | Tags` line for prompts.
    #[must_use]
    pub fn prompt_line(&self) -> String {
        format!("{} | {} | {}", self.id, self.body, self.tags.join(", "))
    }
}

impl From<&StoredMemory> for TaggedMemory {
    fn from(memory: &StoredMemory) -> Self {
        Self::from_stored(memory)
    }
}
