//! The seam between the memory filter and whoever runs the model.
//!
//! The filter only needs "system prompt + user text in, text out". That is
//! served either by [`LlmClient`](crate::LlmClient) over HTTP or by the host's
//! own in-process completion function wrapped in [`HostCompletion`].

use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;
use serde_json::Value;

use crate::ai_types::{ChatRequest, ChatResponse, Message};
use crate::error::LlmError;

/// Something that turns a system instruction plus user text into model text.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, system_prompt: &str, user_text: &str) -> Result<String, LlmError>;
}

/// What a host completion function hands back: either an already-decoded
/// mapping, or the raw body of a framework response.
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionPayload {
    Json(Value),
    Body(Vec<u8>),
}

impl CompletionPayload {
    /// Extract `choices[0].message.content`.
    ///
    /// # Errors
    /// Returns an error when the body is not UTF-8 JSON, carries an `error`
    /// object, or has no choices.
    pub fn into_content(self) -> Result<String, LlmError> {
        let value = match self {
            Self::Json(value) => value,
            Self::Body(bytes) => {
                let text = String::from_utf8(bytes)?;
                serde_json::from_str(&text).map_err(|e| LlmError::JsonParse {
                    context: "host completion body".to_owned(),
                    source: e,
                })?
            },
        };
        let response: ChatResponse = serde_json::from_value(value).map_err(|e| LlmError::JsonParse {
            context: "host completion mapping".to_owned(),
            source: e,
        })?;
        response.into_content()
    }
}

/// Boxed future returned by a host completion function.
pub type CompletionFuture = Pin<Box<dyn Future<Output = Result<CompletionPayload, LlmError>> + Send>>;

/// Adapter for a host's in-process completion function.
///
/// The function receives the same request body the HTTP client would send.
pub struct HostCompletion<F> {
    model: String,
    temperature: f32,
    max_tokens: u32,
    call: F,
}

impl<F> HostCompletion<F>
where
    F: Fn(ChatRequest) -> CompletionFuture + Send + Sync,
{
    pub fn new(model: impl Into<String>, temperature: f32, max_tokens: u32, call: F) -> Self {
        Self { model: model.into(), temperature, max_tokens, call }
    }
}

#[async_trait]
impl<F> CompletionProvider for HostCompletion<F>
where
    F: Fn(ChatRequest) -> CompletionFuture + Send + Sync,
{
    async fn complete(&self, system_prompt: &str, user_text: &str) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![Message::system(system_prompt), Message::user(user_text)],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };
        (self.call)(request).await?.into_content()
    }
}
