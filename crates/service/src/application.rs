//! Apply validated operations to the store for one user.
//!
//! Sequential and best effort: every operation yields one `AppliedOperation`
//! in input order, a failure is recorded and the next operation still runs.
//! There is no rollback. UPDATE is delete + insert, so the record id changes.

use automem_core::{MemoryOperation, OperationKind, format_tagged_content};
use automem_storage::{MemoryStore, StorageError};
use serde::{Deserialize, Serialize};

/// What happened to one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Inserted { id: String },
    Updated { old_id: String, new_id: String },
    Deleted,
    /// Target id not found, or owned by another user.
    Missing,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedOperation {
    pub operation: MemoryOperation,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl AppliedOperation {
    /// Whether the store was changed as requested.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        matches!(self.outcome, Outcome::Inserted { .. } | Outcome::Updated { .. } | Outcome::Deleted)
    }

    /// Id of the record the operation left behind, for NEW and UPDATE.
    #[must_use]
    pub fn resulting_id(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Inserted { id } => Some(id),
            Outcome::Updated { new_id, .. } => Some(new_id),
            _ => None,
        }
    }
}

/// Apply `operations` in order on behalf of `user_id`.
pub async fn apply_operations(
    store: &dyn MemoryStore,
    user_id: &str,
    operations: Vec<MemoryOperation>,
) -> Vec<AppliedOperation> {
    let mut applied = Vec::with_capacity(operations.len());
    for operation in operations {
        let outcome = match apply_one(store, user_id, &operation).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(
                    user_id,
                    operation = %operation.operation,
                    memory_id = operation.target_id().unwrap_or(""),
                    error = %e,
                    "Failed to apply memory operation"
                );
                Outcome::Failed { reason: e.to_string() }
            },
        };
        if outcome == Outcome::Missing {
            tracing::debug!(
                user_id,
                operation = %operation.operation,
                memory_id = operation.target_id().unwrap_or(""),
                "Memory operation target not found"
            );
        }
        applied.push(AppliedOperation { operation, outcome });
    }
    applied
}

async fn apply_one(
    store: &dyn MemoryStore,
    user_id: &str,
    operation: &MemoryOperation,
) -> Result<Outcome, StorageError> {
    match operation.operation {
        OperationKind::New => {
            let content = format_tagged_content(&operation.tags, operation.body().unwrap_or(""));
            let record = store.insert(user_id, &content).await?;
            tracing::debug!(user_id, memory_id = %record.id, "Inserted memory");
            Ok(Outcome::Inserted { id: record.id })
        },
        OperationKind::Update => {
            let Some(id) = owned_target(store, user_id, operation).await? else {
                return Ok(Outcome::Missing);
            };
            if !store.delete_by_id(&id).await? {
                return Ok(Outcome::Missing);
            }
            let content = format_tagged_content(&operation.tags, operation.body().unwrap_or(""));
            let record = store.insert(user_id, &content).await.inspect_err(|e| {
                tracing::error!(user_id, memory_id = %id, error = %e, "Update lost memory: deleted but re-insert failed");
            })?;
            tracing::debug!(user_id, old_id = %id, new_id = %record.id, "Updated memory");
            Ok(Outcome::Updated { old_id: id, new_id: record.id })
        },
        OperationKind::Delete => {
            let Some(id) = owned_target(store, user_id, operation).await? else {
                return Ok(Outcome::Missing);
            };
            if store.delete_by_id(&id).await? {
                tracing::debug!(user_id, memory_id = %id, "Deleted memory");
                Ok(Outcome::Deleted)
            } else {
                Ok(Outcome::Missing)
            }
        },
    }
}

/// Target id when the record exists and belongs to `user_id`.
async fn owned_target(
    store: &dyn MemoryStore,
    user_id: &str,
    operation: &MemoryOperation,
) -> Result<Option<String>, StorageError> {
    let Some(id) = operation.target_id() else {
        return Ok(None);
    };
    Ok(store.get_by_id(id).await?.filter(|record| record.user_id == user_id).map(|record| record.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FailingStore;
    use automem_storage::InMemoryStore;

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| (*t).to_owned()).collect()
    }

    #[tokio::test]
    async fn test_new_stores_tagged_content() {
        let store = InMemoryStore::new();
        let applied =
            apply_operations(&store, "u1", vec![MemoryOperation::new_memory("Prefers oat milk", tags(&["food", "coffee"]))])
                .await;

        assert_eq!(applied.len(), 1);
        let Some(id) = applied[0].resulting_id() else {
            panic!("expected an inserted id, got {:?}", applied[0].outcome);
        };
        let record = store.get_by_id(id).await.ok().flatten();
        assert_eq!(record.map(|r| r.content).as_deref(), Some("[Tags: food, coffee] Prefers oat milk"));
    }

    #[tokio::test]
    async fn test_update_replaces_record_with_new_id() {
        let store = InMemoryStore::new();
        store.seed("1", "u1", "[Tags: location] User lives in London").await;

        let applied = apply_operations(
            &store,
            "u1",
            vec![MemoryOperation::update("1", "User lives in Paris", tags(&["location"]))],
        )
        .await;

        let Outcome::Updated { old_id, new_id } = &applied[0].outcome else {
            panic!("expected Updated, got {:?}", applied[0].outcome);
        };
        assert_eq!(old_id, "1");
        assert_ne!(new_id, "1");
        assert!(store.get_by_id("1").await.ok().flatten().is_none());
        let all = store.all().await;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].content, "[Tags: location] User lives in Paris");
    }

    #[tokio::test]
    async fn test_missing_targets_are_noops() {
        let store = InMemoryStore::new();
        store.seed("keep", "u1", "Likes jazz").await;

        let applied = apply_operations(
            &store,
            "u1",
            vec![MemoryOperation::delete("gone"), MemoryOperation::update("gone", "x", Vec::new())],
        )
        .await;

        assert!(applied.iter().all(|a| a.outcome == Outcome::Missing));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_other_users_records_are_untouched() {
        let store = InMemoryStore::new();
        store.seed("theirs", "u2", "Secret fact").await;

        let applied = apply_operations(
            &store,
            "u1",
            vec![MemoryOperation::delete("theirs"), MemoryOperation::update("theirs", "hijacked", Vec::new())],
        )
        .await;

        assert!(applied.iter().all(|a| a.outcome == Outcome::Missing));
        let record = store.get_by_id("theirs").await.ok().flatten();
        assert_eq!(record.map(|r| r.content).as_deref(), Some("Secret fact"));
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_later_operations() {
        let store = FailingStore::failing_inserts_after(1);
        let applied = apply_operations(
            &store,
            "u1",
            vec![
                MemoryOperation::new_memory("first", Vec::new()),
                MemoryOperation::new_memory("second", Vec::new()),
                MemoryOperation::delete("nope"),
            ],
        )
        .await;

        assert!(matches!(applied[0].outcome, Outcome::Inserted { .. }));
        assert!(matches!(applied[1].outcome, Outcome::Failed { .. }));
        assert_eq!(applied[2].outcome, Outcome::Missing);
    }

    #[tokio::test]
    async fn test_empty_list_changes_nothing() {
        let store = InMemoryStore::new();
        store.seed("1", "u1", "Likes jazz").await;
        assert!(apply_operations(&store, "u1", Vec::new()).await.is_empty());
        assert_eq!(store.all().await.len(), 1);
    }
}
