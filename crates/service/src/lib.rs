//! Service layer for automem
//!
//! The memory filter pipeline between the host hooks (HTTP/CLI) and the
//! storage/llm crates: extraction, application, relevance retrieval, and the
//! inlet/outlet orchestration that ties them into a chat turn.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short error vars are idiomatic")]

pub mod application;
mod context;
mod error;
pub mod extraction;
mod filter;
mod memory_service;
pub mod relevance;

#[cfg(test)]
mod test_support;

pub use application::{AppliedOperation, Outcome};
pub use context::{ChannelEmitter, EventEmitter, HookContext, NoopEmitter};
pub use error::ServiceError;
pub use filter::{InletOutcome, MemoryFilter, TurnRecord};
pub use memory_service::MemoryService;
