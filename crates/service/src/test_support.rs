//! Test doubles shared by the service tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use automem_core::{HostEvent, StoredMemory, TaggedMemory};
use automem_llm::{CompletionProvider, LlmError};
use automem_storage::{InMemoryStore, MemoryStore, StorageError};

use crate::{EventEmitter, ServiceError};

pub(crate) fn tagged(id: &str, body: &str, tags: &[&str]) -> TaggedMemory {
    let tags: Vec<String> = tags.iter().map(|t| (*t).to_owned()).collect();
    TaggedMemory {
        id: id.to_owned(),
        content: automem_core::format_tagged_content(&tags, body),
        body: body.to_owned(),
        tags,
    }
}

/// Replies with canned texts in order; errors once the script runs out.
pub(crate) struct ScriptedProvider {
    replies: Mutex<VecDeque<String>>,
    system_prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub(crate) fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            system_prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn system_prompts(&self) -> Vec<String> {
        self.system_prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(&self, system_prompt: &str, _user_text: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.system_prompts.lock() {
            prompts.push(system_prompt.to_owned());
        }
        self.replies
            .lock()
            .ok()
            .and_then(|mut r| r.pop_front())
            .ok_or_else(|| LlmError::Host("script exhausted".to_owned()))
    }
}

/// Provider that always fails like an unreachable endpoint.
pub(crate) struct FailingProvider;

#[async_trait]
impl CompletionProvider for FailingProvider {
    async fn complete(&self, _system_prompt: &str, _user_text: &str) -> Result<String, LlmError> {
        Err(LlmError::HttpStatus { code: 503, body: "connection refused".to_owned() })
    }
}

/// In-memory store whose inserts start failing after a number of successes.
pub(crate) struct FailingStore {
    inner: InMemoryStore,
    inserts_left: AtomicUsize,
}

impl FailingStore {
    pub(crate) fn failing_inserts_after(successes: usize) -> Self {
        Self { inner: InMemoryStore::new(), inserts_left: AtomicUsize::new(successes) }
    }

    pub(crate) fn inner(&self) -> &InMemoryStore {
        &self.inner
    }
}

#[async_trait]
impl MemoryStore for FailingStore {
    async fn insert(&self, user_id: &str, content: &str) -> Result<StoredMemory, StorageError> {
        let allowed = self
            .inserts_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if !allowed {
            return Err(StorageError::Rejected("disk full".to_owned()));
        }
        self.inner.insert(user_id, content).await
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<StoredMemory>, StorageError> {
        self.inner.get_by_id(id).await
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, StorageError> {
        self.inner.delete_by_id(id).await
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<StoredMemory>, StorageError> {
        self.inner.list_by_user(user_id).await
    }
}

/// Store that fails every call.
pub(crate) struct BrokenStore;

#[async_trait]
impl MemoryStore for BrokenStore {
    async fn insert(&self, _user_id: &str, _content: &str) -> Result<StoredMemory, StorageError> {
        Err(StorageError::Database("no such table: memories".to_owned()))
    }

    async fn get_by_id(&self, _id: &str) -> Result<Option<StoredMemory>, StorageError> {
        Err(StorageError::Database("no such table: memories".to_owned()))
    }

    async fn delete_by_id(&self, _id: &str) -> Result<bool, StorageError> {
        Err(StorageError::Database("no such table: memories".to_owned()))
    }

    async fn list_by_user(&self, _user_id: &str) -> Result<Vec<StoredMemory>, StorageError> {
        Err(StorageError::Database("no such table: memories".to_owned()))
    }
}

/// Records every event it receives.
#[derive(Default)]
pub(crate) struct RecordingEmitter {
    events: Mutex<Vec<HostEvent>>,
}

impl RecordingEmitter {
    pub(crate) fn events(&self) -> Vec<HostEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl EventEmitter for RecordingEmitter {
    async fn emit(&self, event: HostEvent) -> Result<(), ServiceError> {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
        Ok(())
    }
}

/// Emitter whose channel is always closed.
pub(crate) struct ClosedEmitter;

#[async_trait]
impl EventEmitter for ClosedEmitter {
    async fn emit(&self, _event: HostEvent) -> Result<(), ServiceError> {
        Err(ServiceError::EventChannel("closed".to_owned()))
    }
}
