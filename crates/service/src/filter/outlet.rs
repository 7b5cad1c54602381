use std::fmt::Write as _;

use automem_core::append_assistant_message;
use serde_json::Value;

use super::{MemoryFilter, TurnRecord};
use crate::HookContext;

impl MemoryFilter {
    /// Post-response hook.
    ///
    /// Appends one assistant message listing what was stored during the
    /// matching inlet. The turn record is consumed; an empty record (or one with
    /// only deletions) leaves the body untouched.
    pub async fn outlet(&self, ctx: &HookContext, body: Value, turn: TurnRecord) -> Value {
        if turn.is_empty() {
            return body;
        }
        if !self.config().await.enabled {
            return body;
        }
        let Some(summary) = summarize(&turn) else {
            return body;
        };

        let mut body = body;
        if append_assistant_message(&mut body, &summary) {
            tracing::debug!(
                user_id = ctx.current_user().map_or("", |u| u.id.as_str()),
                stored = turn.len(),
                "Appended memory summary"
            );
        } else {
            tracing::debug!("Outlet body has no messages array, leaving it unchanged");
        }
        body
    }
}

fn summarize(turn: &TurnRecord) -> Option<String> {
    let mut lines = turn.stored_contents().peekable();
    lines.peek()?;
    let mut out = String::from("Saved to memory:");
    for content in lines {
        _ = write!(out, "\n- {content}");
    }
    Some(out)
}
