//! Fail-open wrapper around the extraction prompt.

use automem_core::{MemoryOperation, TaggedMemory};
use automem_llm::CompletionProvider;
use automem_llm::operations::extract_operations;
use chrono::{DateTime, Utc};

/// Operations the model proposes for `text`, or an empty list on any failure.
///
/// `existing` is the full set of the user's memories (relevant first); the
/// prompt only shows the first `max_prompt_memories` of them.
pub async fn extract(
    provider: &dyn CompletionProvider,
    text: &str,
    existing: &[TaggedMemory],
    max_prompt_memories: usize,
    now: DateTime<Utc>,
) -> Vec<MemoryOperation> {
    match extract_operations(provider, text, existing, max_prompt_memories, now).await {
        Ok(parsed) => {
            if parsed.rejected > 0 {
                tracing::info!(
                    kept = parsed.operations.len(),
                    rejected = parsed.rejected,
                    "Dropped invalid memory operations from model reply"
                );
            }
            parsed.operations
        },
        Err(e) => {
            tracing::warn!(error = %e, "Memory extraction failed, continuing without operations");
            Vec::new()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FailingProvider, ScriptedProvider, tagged};
    use automem_core::OperationKind;

    #[tokio::test]
    async fn test_extract_returns_valid_operations() {
        let provider = ScriptedProvider::new([
            r#"[{"operation": "NEW", "content": "User has a dog", "tags": ["pets"]}, {"operation": "DELETE"}]"#,
        ]);
        let ops = extract(&provider, "I got a dog", &[], 10, Utc::now()).await;
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].operation, OperationKind::New);
        assert_eq!(ops[0].tags, vec!["pets"]);
    }

    #[tokio::test]
    async fn test_extract_recognizes_ids_outside_prompt_window() {
        let existing: Vec<_> = (0..12).map(|i| tagged(&format!("m{i}"), &format!("fact {i}"), &[])).collect();
        let provider = ScriptedProvider::new([r#"[{"operation": "DELETE", "id": "m11"}]"#]);
        let ops = extract(&provider, "forget fact 11", &existing, 10, Utc::now()).await;
        assert_eq!(ops, vec![MemoryOperation::delete("m11")]);
        assert!(!provider.system_prompts()[0].contains("m11 |"));
    }

    #[tokio::test]
    async fn test_extract_malformed_reply_is_empty() {
        for reply in ["not json at all", r#"{"operation": "NEW"}"#, "[1, 2, 3]", "[]"] {
            let provider = ScriptedProvider::new([reply]);
            assert!(extract(&provider, "hello", &[], 10, Utc::now()).await.is_empty(), "reply: {reply}");
        }
    }

    #[tokio::test]
    async fn test_extract_transport_failure_is_empty() {
        assert!(extract(&FailingProvider, "hello", &[], 10, Utc::now()).await.is_empty());
    }
}
