//! Turn orchestration: the inlet/outlet hooks and the add-exchange action.

mod action;
mod inlet;
mod outlet;

#[cfg(test)]
mod inlet_tests;

use std::sync::Arc;
use std::time::Duration;

use automem_core::{FilterConfig, OperationKind, TaggedMemory};
use automem_llm::{CompletionProvider, LlmClient};
use automem_storage::MemoryStore;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;

use crate::{AppliedOperation, ServiceError};

/// The memory filter. Cheap to share behind an `Arc`; holds no per-turn state.
pub struct MemoryFilter {
    pub(crate) config: Arc<RwLock<FilterConfig>>,
    pub(crate) store: Arc<dyn MemoryStore>,
    pub(crate) http: reqwest::Client,
}

/// Operations stored during an inlet, handed to the matching outlet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub operations: Vec<AppliedOperation>,
}

impl TurnRecord {
    /// Keep only the operations that changed the store.
    #[must_use]
    pub fn from_applied(applied: &[AppliedOperation]) -> Self {
        Self { operations: applied.iter().filter(|a| a.succeeded()).cloned().collect() }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Contents written by NEW and UPDATE operations, in order.
    pub fn stored_contents(&self) -> impl Iterator<Item = &str> {
        self.operations
            .iter()
            .filter(|a| a.operation.operation != OperationKind::Delete)
            .filter_map(|a| a.operation.body())
    }
}

/// Result of the inlet hook.
#[derive(Debug, Clone, PartialEq)]
pub struct InletOutcome {
    pub body: Value,
    pub turn: TurnRecord,
}

impl InletOutcome {
    pub(crate) fn unchanged(body: Value) -> Self {
        Self { body, turn: TurnRecord::default() }
    }
}

impl MemoryFilter {
    /// Filter over `store` with its own connection pool for the completion endpoint.
    pub fn new(config: FilterConfig, store: Arc<dyn MemoryStore>) -> Result<Self, ServiceError> {
        let http = LlmClient::http_client(Duration::from_secs(config.request_timeout_secs))?;
        Ok(Self { config: Arc::new(RwLock::new(config)), store, http })
    }

    /// Snapshot of the current configuration.
    pub async fn config(&self) -> FilterConfig {
        self.config.read().await.clone()
    }

    /// Replace the configuration; the next hook call picks it up.
    pub async fn replace_config(&self, config: FilterConfig) {
        tracing::info!(config = ?config, "Filter configuration replaced");
        *self.config.write().await = config;
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn MemoryStore> {
        &self.store
    }

    /// Host completion when the context carries one, else the configured endpoint.
    pub(crate) fn provider(
        &self,
        ctx: &crate::HookContext,
        config: &FilterConfig,
    ) -> Arc<dyn CompletionProvider> {
        ctx.completion().unwrap_or_else(|| Arc::new(LlmClient::with_http(self.http.clone(), config)))
    }

    /// All memories of a user, parsed. Empty when the store fails.
    pub(crate) async fn user_memories(&self, user_id: &str) -> Vec<TaggedMemory> {
        match self.store.list_by_user(user_id).await {
            Ok(records) => records.iter().map(TaggedMemory::from).collect(),
            Err(e) => {
                tracing::warn!(user_id, error = %e, "Failed to list memories, continuing without them");
                Vec::new()
            },
        }
    }
}
