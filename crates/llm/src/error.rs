//! Typed error enum for the LLM crate.

use thiserror::Error;

/// Errors from completion calls and model-reply interpretation.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("HTTP status {code}: {body}")]
    HttpStatus { code: u16, body: String },
    #[error("JSON parse error in {context}: {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("empty response: no choices returned")]
    EmptyResponse,
    #[error("completion API reported an error: {0}")]
    Api(String),
    #[error("unexpected reply shape: {0}")]
    InvalidShape(String),
    #[error("response body is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
    #[error("client initialization failed: {0}")]
    ClientInit(String),
    #[error("host completion failed: {0}")]
    Host(String),
}

impl LlmError {
    /// Whether this error is transient (the caller may try again next turn).
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::HttpRequest(e) => e.is_timeout() || e.is_connect(),
            Self::HttpStatus { code, .. } => matches!(code, 429 | 500 | 502 | 503 | 529),
            _ => false,
        }
    }
}
