use serde::{Deserialize, Serialize};

/// OpenAI-compatible chat-completion request body.
///
/// Also the "form data" handed to a host's in-process completion function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_owned(), content: content.into() }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_owned(), content: content.into() }
    }
}

#[derive(Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

#[derive(Deserialize)]
pub(crate) struct Choice {
    pub message: ResponseMessage,
}

#[derive(Deserialize)]
pub(crate) struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
}

impl ChatResponse {
    /// Content of the first choice, or the API-reported error.
    pub(crate) fn into_content(self) -> Result<String, crate::LlmError> {
        if let Some(err) = self.error {
            return Err(crate::LlmError::Api(err.message));
        }
        let first = self.choices.into_iter().next().ok_or(crate::LlmError::EmptyResponse)?;
        Ok(first.message.content.unwrap_or_default())
    }
}
