//! Turn records waiting for their outlet.

use std::collections::HashMap;

use automem_service::TurnRecord;
use tokio::sync::Mutex;

/// Pending turn records keyed by `(user_id, chat_id)`.
///
/// A newer inlet for the same chat replaces an unclaimed record.
#[derive(Default)]
pub struct PendingTurns {
    turns: Mutex<HashMap<(String, String), TurnRecord>>,
}

impl PendingTurns {
    pub async fn insert(&self, user_id: &str, chat_id: &str, turn: TurnRecord) {
        let mut turns = self.turns.lock().await;
        if turns.insert((user_id.to_owned(), chat_id.to_owned()), turn).is_some() {
            tracing::debug!(user_id, chat_id, "Replaced unclaimed turn record");
        }
    }

    /// Remove and return the record for a chat, empty when there is none.
    pub async fn take(&self, user_id: &str, chat_id: &str) -> TurnRecord {
        self.turns.lock().await.remove(&(user_id.to_owned(), chat_id.to_owned())).unwrap_or_default()
    }

    pub async fn len(&self) -> usize {
        self.turns.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
