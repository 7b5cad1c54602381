//! Tag-based relevance retrieval.

use std::collections::{BTreeSet, HashSet};

use automem_core::TaggedMemory;
use automem_llm::CompletionProvider;
use automem_llm::relevance::select_relevant_tags;

/// Distinct tags across `memories`, sorted.
#[must_use]
pub fn tag_vocabulary(memories: &[TaggedMemory]) -> Vec<String> {
    memories.iter().flat_map(|m| m.tags.iter().cloned()).collect::<BTreeSet<_>>().into_iter().collect()
}

/// Rank memories by how many of their tags are in `relevant`.
///
/// Memories sharing no tag are dropped. Ties are broken by the full stored
/// content (tags prefix included), ascending.
#[must_use]
pub fn rank_by_tags(memories: &[TaggedMemory], relevant: &[String], limit: usize) -> Vec<TaggedMemory> {
    let relevant: HashSet<&str> = relevant.iter().map(String::as_str).collect();
    let mut scored: Vec<(usize, &TaggedMemory)> = memories
        .iter()
        .map(|m| (m.tags.iter().filter(|t| relevant.contains(t.as_str())).count(), m))
        .filter(|(score, _)| *score > 0)
        .collect();
    scored.sort_by(|(sa, a), (sb, b)| sb.cmp(sa).then_with(|| a.content.cmp(&b.content)));
    scored.into_iter().take(limit).map(|(_, m)| m.clone()).collect()
}

/// Memories relevant to `message`, best first. Empty on any failure.
pub async fn relevant_memories(
    provider: &dyn CompletionProvider,
    message: &str,
    memories: &[TaggedMemory],
    limit: usize,
) -> Vec<TaggedMemory> {
    let vocabulary = tag_vocabulary(memories);
    if vocabulary.is_empty() {
        return Vec::new();
    }
    match select_relevant_tags(provider, message, &vocabulary).await {
        Ok(tags) => {
            tracing::debug!(tags = ?tags, "Selected relevant tags");
            rank_by_tags(memories, &tags, limit)
        },
        Err(e) => {
            tracing::warn!(error = %e, "Relevance retrieval failed, continuing without memories");
            Vec::new()
        },
    }
}
