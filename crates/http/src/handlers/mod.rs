pub mod action;
pub mod admin;
pub mod filter;
pub mod memories;

use std::sync::Arc;

use automem_core::{HostEvent, UserIdentity};
use automem_service::{ChannelEmitter, HookContext};
use serde_json::Value;
use tokio::sync::mpsc;

/// Hook context for a request, plus the receiver collecting its events.
pub(crate) fn hook_context(user: &Value) -> (HookContext, mpsc::UnboundedReceiver<HostEvent>) {
    let (emitter, rx) = ChannelEmitter::channel();
    let ctx = HookContext::new(UserIdentity::from_host(user)).with_emitter(Arc::new(emitter));
    (ctx, rx)
}

/// Events already queued on the channel. Anything sent after this call is missed.
pub(crate) fn drain_events(mut rx: mpsc::UnboundedReceiver<HostEvent>) -> Vec<HostEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
