use std::time::Duration;

use async_trait::async_trait;
use automem_core::FilterConfig;

use crate::ai_types::{ChatRequest, ChatResponse, Message};
use crate::error::LlmError;
use crate::provider::CompletionProvider;

/// Client for an OpenAI-compatible chat-completion endpoint.
#[derive(Clone)]
pub struct LlmClient {
    pub(crate) client: reqwest::Client,
    pub(crate) api_key: String,
    pub(crate) base_url: String,
    pub(crate) model: String,
    pub(crate) temperature: f32,
    pub(crate) max_tokens: u32,
}

impl std::fmt::Debug for LlmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmClient")
            .field("client", &self.client)
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl LlmClient {
    /// Build the shared HTTP client used by every `LlmClient`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn http_client(timeout: Duration) -> Result<reqwest::Client, LlmError> {
        reqwest::Client::builder().timeout(timeout).build().map_err(|e| LlmError::ClientInit(e.to_string()))
    }

    /// Creates a new LLM client with the given API key and base URL.
    ///
    /// `base_url` is the API root including any version segment, e.g.
    /// `https://api.openai.com/v1`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(api_key: String, base_url: String) -> Result<Self, LlmError> {
        let defaults = FilterConfig::default();
        let client = Self::http_client(Duration::from_secs(defaults.request_timeout_secs))?;
        Ok(Self::with_http(client, &FilterConfig { api_key, api_url: base_url, ..defaults }))
    }

    /// Client for the endpoint described by `config`, reusing an existing
    /// connection pool.
    #[must_use]
    pub fn with_http(client: reqwest::Client, config: &FilterConfig) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.api_url.trim_end_matches('/').to_owned(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    /// Sets a custom model for this client.
    #[must_use]
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Request body for one system + user exchange with this client's settings.
    #[must_use]
    pub fn build_request(&self, system_prompt: &str, user_text: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![Message::system(system_prompt), Message::user(user_text)],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    /// Send a chat completion request and return the extracted content string.
    ///
    /// Single attempt; transient failures surface to the caller, which drops the
    /// memory work for this turn.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails, the API returns a
    /// non-success status or an `error` object, the response body cannot be
    /// parsed, or the choices array is empty.
    pub async fn chat_completion(&self, request: &ChatRequest) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);
        tracing::debug!(%url, model = %request.model, "sending chat completion");

        let response = self.client.post(&url).bearer_auth(&self.api_key).json(request).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(LlmError::HttpStatus { code: status.as_u16(), body });
        }

        let chat_response: ChatResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::JsonParse {
                context: format!("chat completion response (body: {})", truncate(&body, 200)),
                source: e,
            })?;

        chat_response.into_content()
    }
}

#[async_trait]
impl CompletionProvider for LlmClient {
    async fn complete(&self, system_prompt: &str, user_text: &str) -> Result<String, LlmError> {
        let request = self.build_request(system_prompt, user_text);
        self.chat_completion(&request).await
    }
}

/// Truncates a string to the given maximum length at a char boundary.
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        s
    } else {
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end = end.saturating_sub(1);
        }
        s.get(..end).unwrap_or("")
    }
}
