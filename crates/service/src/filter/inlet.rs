use std::collections::HashSet;
use std::fmt::Write as _;

use automem_core::{OperationKind, TaggedMemory, latest_user_text, splice_system_message};
use chrono::Utc;
use serde_json::Value;

use super::{InletOutcome, MemoryFilter, TurnRecord};
use crate::application::{AppliedOperation, Outcome, apply_operations};
use crate::{HookContext, extraction, relevance};

impl MemoryFilter {
    /// Pre-request hook.
    ///
    /// Retrieves relevant memories, extracts and applies memory operations from
    /// the latest user message, and splices a system message describing both.
    /// Never fails: on any problem the body comes back unchanged.
    pub async fn inlet(&self, ctx: &HookContext, body: Value) -> InletOutcome {
        let config = self.config().await;
        if !config.enabled {
            tracing::debug!("Memory filter disabled");
            return InletOutcome::unchanged(body);
        }
        let Some(user) = ctx.current_user() else {
            tracing::debug!("No user in hook context, skipping memory processing");
            return InletOutcome::unchanged(body);
        };
        let Some(text) = latest_user_text(&body) else {
            tracing::debug!(user_id = %user.id, "No user message to process");
            return InletOutcome::unchanged(body);
        };

        ctx.emit_status("Processing memories...", false).await;

        let provider = self.provider(ctx, &config);
        let memories = self.user_memories(&user.id).await;
        let relevant =
            relevance::relevant_memories(provider.as_ref(), &text, &memories, config.related_memories_n).await;
        let existing = relevant_first(&relevant, &memories);
        let operations =
            extraction::extract(provider.as_ref(), &text, &existing, config.max_prompt_memories, Utc::now()).await;
        let applied = apply_operations(self.store.as_ref(), &user.id, operations).await;
        let turn = TurnRecord::from_applied(&applied);

        tracing::info!(
            user_id = %user.id,
            relevant = relevant.len(),
            applied = applied.len(),
            stored = turn.len(),
            "Processed memories for turn"
        );

        let mut body = body;
        if let Some(context) = render_context(&applied, &relevant) {
            splice_system_message(&mut body, &context);
        }

        ctx.emit_status(format!("Stored {} memories", turn.len()), true).await;
        InletOutcome { body, turn }
    }
}

/// `relevant` followed by the remaining memories, without duplicates.
fn relevant_first(relevant: &[TaggedMemory], all: &[TaggedMemory]) -> Vec<TaggedMemory> {
    let seen: HashSet<&str> = relevant.iter().map(|m| m.id.as_str()).collect();
    relevant.iter().chain(all.iter().filter(|m| !seen.contains(m.id.as_str()))).cloned().collect()
}

/// System-message text for this turn, `None` when there is nothing to say.
///
/// Relevant memories that this turn deleted or replaced are left out.
pub(super) fn render_context(applied: &[AppliedOperation], relevant: &[TaggedMemory]) -> Option<String> {
    let done: Vec<&AppliedOperation> = applied.iter().filter(|a| a.succeeded()).collect();
    let superseded: HashSet<&str> = done
        .iter()
        .filter(|a| a.operation.operation != OperationKind::New)
        .filter_map(|a| a.operation.target_id())
        .collect();
    let still_relevant: Vec<&TaggedMemory> =
        relevant.iter().filter(|m| !superseded.contains(m.id.as_str())).collect();

    if done.is_empty() && still_relevant.is_empty() {
        return None;
    }

    let mut out = String::new();
    if !done.is_empty() {
        out.push_str("Memory operations this turn:\n");
        for applied in &done {
            _ = writeln!(out, "- {}", describe(applied));
        }
    }
    if !still_relevant.is_empty() {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str("Relevant memories:\n");
        for memory in still_relevant {
            _ = writeln!(out, "- {}{}", memory.body, tag_suffix(&memory.tags));
        }
    }
    Some(out.trim_end().to_owned())
}

fn describe(applied: &AppliedOperation) -> String {
    let op = &applied.operation;
    let body = op.body().unwrap_or("");
    match &applied.outcome {
        Outcome::Inserted { id } => format!("NEW {id}: {body}{}", tag_suffix(&op.tags)),
        Outcome::Updated { old_id, new_id } => {
            format!("UPDATE {old_id} -> {new_id}: {body}{}", tag_suffix(&op.tags))
        },
        _ => format!("{} {}", op.operation, op.target_id().unwrap_or("")),
    }
}

fn tag_suffix(tags: &[String]) -> String {
    if tags.is_empty() { String::new() } else { format!(" (tags: {})", tags.join(", ")) }
}
