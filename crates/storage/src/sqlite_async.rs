//! Async `MemoryStore` implementation for SQLite `Storage` via `spawn_blocking`.

use async_trait::async_trait;
use automem_core::StoredMemory;

use crate::{MemoryStore, Storage, StorageError};

/// Helper: run a blocking closure on the tokio blocking pool.
async fn blocking<F, T>(f: F) -> Result<T, StorageError>
where
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StorageError::Join(format!("spawn_blocking join error: {e}")))?
}

/// Body-generating macro for async-to-blocking delegation.
///
/// Each argument is annotated with a capture kind:
/// - `@str arg`: `.to_owned()` a `&str`, pass as `&arg`
macro_rules! delegate {
    ($self:ident, $method:ident $(, @$kind:ident $arg:ident)*) => {{
        let s = $self.clone();
        $(delegate!(@capture $kind $arg);)*
        blocking(move || s.$method($(delegate!(@pass $kind $arg)),*)).await
    }};
    (@capture str $arg:ident) => { let $arg = $arg.to_owned(); };
    (@pass str $arg:ident) => { &$arg };
}

#[async_trait]
impl MemoryStore for Storage {
    async fn insert(&self, user_id: &str, content: &str) -> Result<StoredMemory, StorageError> {
        delegate!(self, insert_memory, @str user_id, @str content)
    }
    async fn get_by_id(&self, id: &str) -> Result<Option<StoredMemory>, StorageError> {
        delegate!(self, get_memory, @str id)
    }
    async fn delete_by_id(&self, id: &str) -> Result<bool, StorageError> {
        delegate!(self, delete_memory, @str id)
    }
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<StoredMemory>, StorageError> {
        delegate!(self, list_user_memories, @str user_id)
    }
}
