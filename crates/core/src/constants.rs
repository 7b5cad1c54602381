//! Shared constants for automem.

/// Maximum number of existing memories embedded in the extraction prompt.
pub const DEFAULT_MAX_PROMPT_MEMORIES: usize = 10;

/// Default number of relevant memories injected into a request.
pub const DEFAULT_RELATED_MEMORIES_N: usize = 10;

/// Default chat-completion endpoint base (OpenAI-compatible, includes `/v1`).
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1";

/// Default model used for memory processing.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default sampling temperature for memory processing calls.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default completion token cap for memory processing calls.
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Default HTTP timeout for the completion endpoint.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Name used as citation origin for events emitted by the add-memory action.
pub const ADD_MEMORY_ACTION_NAME: &str = "Add to Memory Action Button";

/// Placeholder shown instead of the API key.
pub const REDACTED_API_KEY: &str = "***";
