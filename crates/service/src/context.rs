//! Per-call hook context: acting user, event channel, completion provider.

use std::sync::Arc;

use async_trait::async_trait;
use automem_core::{HostEvent, UserIdentity};
use automem_llm::CompletionProvider;
use tokio::sync::mpsc;

use crate::ServiceError;

/// Sink for status/citation events shown in the host UI.
#[async_trait]
pub trait EventEmitter: Send + Sync {
    async fn emit(&self, event: HostEvent) -> Result<(), ServiceError>;
}

/// Emitter that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEmitter;

#[async_trait]
impl EventEmitter for NoopEmitter {
    async fn emit(&self, _event: HostEvent) -> Result<(), ServiceError> {
        Ok(())
    }
}

/// Emitter forwarding events to an mpsc channel.
#[derive(Debug, Clone)]
pub struct ChannelEmitter {
    tx: mpsc::UnboundedSender<HostEvent>,
}

impl ChannelEmitter {
    #[must_use]
    pub fn new(tx: mpsc::UnboundedSender<HostEvent>) -> Self {
        Self { tx }
    }

    /// Emitter plus the receiving end, for callers collecting events.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<HostEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl EventEmitter for ChannelEmitter {
    async fn emit(&self, event: HostEvent) -> Result<(), ServiceError> {
        self.tx.send(event).map_err(|e| ServiceError::EventChannel(format!("receiver dropped: {e}")))
    }
}

/// Everything the host hands a hook besides the request body.
#[derive(Clone)]
pub struct HookContext {
    user: Option<UserIdentity>,
    emitter: Arc<dyn EventEmitter>,
    completion: Option<Arc<dyn CompletionProvider>>,
}

impl HookContext {
    #[must_use]
    pub fn new(user: Option<UserIdentity>) -> Self {
        Self { user, emitter: Arc::new(NoopEmitter), completion: None }
    }

    #[must_use]
    pub fn with_emitter(mut self, emitter: Arc<dyn EventEmitter>) -> Self {
        self.emitter = emitter;
        self
    }

    /// Route completions through the host instead of the configured endpoint.
    #[must_use]
    pub fn with_completion(mut self, completion: Arc<dyn CompletionProvider>) -> Self {
        self.completion = Some(completion);
        self
    }

    #[must_use]
    pub fn current_user(&self) -> Option<&UserIdentity> {
        self.user.as_ref()
    }

    /// Host-provided completion function, if any.
    #[must_use]
    pub fn completion(&self) -> Option<Arc<dyn CompletionProvider>> {
        self.completion.clone()
    }

    /// Emit an event; failures are logged and swallowed.
    pub async fn emit(&self, event: HostEvent) {
        let kind = event.kind();
        if let Err(e) = self.emitter.emit(event).await {
            tracing::debug!(error = %e, kind, "failed to emit host event");
        }
    }

    /// Emit a status event when the user wants to see them.
    pub async fn emit_status(&self, description: impl Into<String>, done: bool) {
        if self.user.as_ref().is_some_and(|u| u.valves.show_status) {
            self.emit(HostEvent::status(description, done)).await;
        }
    }
}
