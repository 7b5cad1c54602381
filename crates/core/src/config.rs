//! Filter configuration ("valves").

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_URL, DEFAULT_MAX_PROMPT_MEMORIES, DEFAULT_MAX_TOKENS, DEFAULT_MODEL,
    DEFAULT_RELATED_MEMORIES_N, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_TEMPERATURE, REDACTED_API_KEY,
};
use crate::env_config::{env_parse_with_default, env_string_with_default};

/// Options supplied per filter instance, re-read on every hook call.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Master switch for the memory filter.
    pub enabled: bool,
    /// Chat-completion base URL, `/chat/completions` is appended.
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    /// How many relevant memories to inject into a request.
    pub related_memories_n: usize,
    /// How many existing memories the extraction prompt may show.
    pub max_prompt_memories: usize,
    pub temperature: f32,
    pub max_tokens: u32,
    pub request_timeout_secs: u64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_url: DEFAULT_API_URL.to_owned(),
            api_key: String::new(),
            model: DEFAULT_MODEL.to_owned(),
            related_memories_n: DEFAULT_RELATED_MEMORIES_N,
            max_prompt_memories: DEFAULT_MAX_PROMPT_MEMORIES,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl std::fmt::Debug for FilterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterConfig")
            .field("enabled", &self.enabled)
            .field("api_url", &self.api_url)
            .field("api_key", &REDACTED_API_KEY)
            .field("model", &self.model)
            .field("related_memories_n", &self.related_memories_n)
            .field("max_prompt_memories", &self.max_prompt_memories)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl FilterConfig {
    /// Build from `AUTOMEM_*` environment variables, falling back to defaults.
    ///
    /// `AUTOMEM_API_KEY` falls back to `OPENAI_API_KEY`.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let api_key = std::env::var("AUTOMEM_API_KEY")
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
            .unwrap_or_default();
        Self {
            enabled: env_parse_with_default("AUTOMEM_ENABLED", defaults.enabled),
            api_url: env_string_with_default("AUTOMEM_API_URL", &defaults.api_url),
            api_key,
            model: env_string_with_default("AUTOMEM_MODEL", &defaults.model),
            related_memories_n: env_parse_with_default(
                "AUTOMEM_RELATED_MEMORIES_N",
                defaults.related_memories_n,
            ),
            max_prompt_memories: env_parse_with_default(
                "AUTOMEM_MAX_PROMPT_MEMORIES",
                defaults.max_prompt_memories,
            ),
            temperature: env_parse_with_default("AUTOMEM_TEMPERATURE", defaults.temperature),
            max_tokens: env_parse_with_default("AUTOMEM_MAX_TOKENS", defaults.max_tokens),
            request_timeout_secs: env_parse_with_default(
                "AUTOMEM_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            ),
        }
    }

    /// Copy safe to return over an API: the key is masked.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.api_key.is_empty() {
            copy.api_key = REDACTED_API_KEY.to_owned();
        }
        copy
    }
}
