//! Typed error enum for the service layer.
//!
//! Hooks never return these to the host; they surface from the listing and
//! manual-add paths used by the CLI and HTTP server, and from event emitters.

use automem_llm::LlmError;
use automem_storage::StorageError;
use thiserror::Error;

/// Service-layer error unifying storage, LLM and input failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed.
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Completion call or reply interpretation failed.
    #[error("llm: {0}")]
    Llm(#[from] LlmError),

    /// Caller provided invalid input (empty content, unknown user).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The host event channel refused an event.
    #[error("event channel: {0}")]
    EventChannel(String),
}

impl ServiceError {
    /// Whether this error is likely transient (worth retrying).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Storage(e) => e.is_transient(),
            Self::Llm(e) => e.is_transient(),
            _ => false,
        }
    }
}
