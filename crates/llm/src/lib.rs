//! LLM integration for automem
//!
//! An OpenAI-compatible chat-completion client, the `CompletionProvider` seam
//! that lets a host plug in its own in-process completion function, and the
//! two prompts the memory filter runs: operation extraction and tag relevance.

mod ai_types;
mod client;
mod error;
pub mod operations;
mod provider;
pub mod relevance;


pub use ai_types::{ChatRequest, Message};
pub use client::{LlmClient, truncate};
pub use error::LlmError;
pub use provider::{CompletionFuture, CompletionPayload, CompletionProvider, HostCompletion};
