use automem_core::{ADD_MEMORY_ACTION_NAME, HostEvent, StoredMemory, last_exchange};
use serde_json::Value;

use super::MemoryFilter;
use crate::HookContext;

impl MemoryFilter {
    /// User-triggered action: store the last user/assistant exchange verbatim.
    ///
    /// Returns the stored record, or `None` when the filter is disabled, there
    /// is no user, the body has fewer than two messages, or the store failed.
    pub async fn add_exchange(&self, ctx: &HookContext, body: &Value) -> Option<StoredMemory> {
        if !self.config().await.enabled {
            return None;
        }
        let user = ctx.current_user()?;
        let Some((user_text, assistant_text)) = last_exchange(body) else {
            tracing::debug!(user_id = %user.id, "Add-memory action needs at least two messages");
            return None;
        };

        ctx.emit_status("Adding to Memories", false).await;

        let content = format!("User: {user_text}\nAssistant: {assistant_text}");
        match self.store.insert(&user.id, &content).await {
            Ok(record) => {
                tracing::info!(user_id = %user.id, memory_id = %record.id, "Stored exchange as memory");
                ctx.emit_status("Memory Saved", true).await;
                Some(record)
            },
            Err(e) => {
                tracing::warn!(user_id = %user.id, error = %e, "Failed to store exchange as memory");
                ctx.emit_status("Error Adding Memory", true).await;
                ctx.emit(HostEvent::citation("Error:adding memory", e.to_string(), ADD_MEMORY_ACTION_NAME))
                    .await;
                None
            },
        }
    }
}
