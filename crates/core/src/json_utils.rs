//! Helpers for interpreting model replies as JSON.

use serde::de::DeserializeOwned;

/// Strip a markdown code fence wrapped around a model reply.
///
/// Handles `` ```json ... ``` ``, `` ``` ... ``` `` and other language identifiers.
/// Anything that is not fully fenced is returned trimmed but otherwise untouched.
#[must_use]
pub fn strip_markdown_json(content: &str) -> &str {
    let trimmed = content.trim();
    if trimmed.len() >= 6 && trimmed.starts_with("```") && trimmed.ends_with("```") {
        let inner = trimmed.get(3..trimmed.len().saturating_sub(3)).unwrap_or(trimmed);
        return inner.split_once('\n').map_or_else(|| inner.trim(), |(_, rest)| rest.trim());
    }
    trimmed
}

/// Parse a model reply as JSON after removing a surrounding code fence.
///
/// # Errors
/// Returns the `serde_json` error when the unfenced text is not valid JSON for `T`.
pub fn parse_model_json<T: DeserializeOwned>(content: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(strip_markdown_json(content))
}
