use std::io::Read as _;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use automem_core::{FilterConfig, UserIdentity};
use automem_service::{ChannelEmitter, HookContext, MemoryFilter};
use serde_json::{Value, json};

use super::open_store;

pub(crate) async fn run(db_path: &Path, user: &str, input: Option<&Path>) -> Result<()> {
    let raw = match input {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        },
    };
    let body: Value = serde_json::from_str(&raw).context("chat body is not valid JSON")?;

    let filter = MemoryFilter::new(FilterConfig::from_env(), open_store(db_path)?)?;
    let (emitter, mut events) = ChannelEmitter::channel();
    let ctx = HookContext::new(Some(UserIdentity::new(user))).with_emitter(Arc::new(emitter));

    let outcome = filter.inlet(&ctx, body).await;
    drop(ctx);
    while let Ok(event) = events.try_recv() {
        tracing::info!(event = ?event, "host event");
    }

    println!("{}", serde_json::to_string_pretty(&json!({"body": outcome.body, "turn": outcome.turn}))?);
    Ok(())
}
