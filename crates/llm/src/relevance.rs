//! Relevance prompt: pick which known tags matter for the current message.

use std::collections::HashSet;

use automem_core::{normalize_tags, strip_markdown_json};
use serde_json::Value;

use crate::client::truncate;
use crate::error::LlmError;
use crate::provider::CompletionProvider;

/// Build the tag-selection system prompt for a tag vocabulary.
#[must_use]
pub fn build_relevance_prompt(vocabulary: &[String]) -> String {
    format!(
        r#"You help decide which stored memories about the user are relevant to their next message.

Available tags: {tags}

Pick the tags from the list above that relate to the user's message. Use only tags from the list. If none apply, return an empty list.

Respond with ONLY a JSON object, no prose:
{{"relevant_tags": ["tag1", "tag2"]}}"#,
        tags = vocabulary.join(", "),
    )
}

/// Parse a relevance reply into tags that exist in `vocabulary`.
///
/// The tag list is read from `relevant_tags`, or else the first array-valued
/// field of the object. Tags are normalized; anything outside the vocabulary is
/// discarded.
///
/// # Errors
/// Returns an error when the reply is not a JSON object holding a tag array.
pub fn parse_relevant_tags(reply: &str, vocabulary: &[String]) -> Result<Vec<String>, LlmError> {
    let content = strip_markdown_json(reply);
    let value: Value = serde_json::from_str(content).map_err(|e| LlmError::JsonParse {
        context: format!("relevant tags (content: {})", truncate(content, 200)),
        source: e,
    })?;
    let Value::Object(map) = value else {
        return Err(LlmError::InvalidShape(format!(
            "expected a JSON object with relevant_tags, got: {}",
            truncate(content, 200)
        )));
    };
    let tags = map
        .get("relevant_tags")
        .and_then(Value::as_array)
        .or_else(|| map.values().find_map(Value::as_array))
        .ok_or_else(|| LlmError::InvalidShape("relevance reply carries no tag array".to_owned()))?;

    let known: HashSet<&str> = vocabulary.iter().map(String::as_str).collect();
    Ok(normalize_tags(tags.iter().filter_map(Value::as_str))
        .into_iter()
        .filter(|t| known.contains(t.as_str()))
        .collect())
}

/// Ask the model which vocabulary tags relate to `message`.
///
/// An empty vocabulary short-circuits without a model call.
///
/// # Errors
/// Propagates completion and parse errors; callers decide how to fail open.
pub async fn select_relevant_tags(
    provider: &dyn CompletionProvider,
    message: &str,
    vocabulary: &[String],
) -> Result<Vec<String>, LlmError> {
    if vocabulary.is_empty() {
        return Ok(Vec::new());
    }
    let prompt = build_relevance_prompt(vocabulary);
    let reply = provider.complete(&prompt, message).await?;
    parse_relevant_tags(&reply, vocabulary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(tags: &[&str]) -> Vec<String> {
        tags.iter().map(|t| (*t).to_owned()).collect()
    }

    #[test]
    fn prompt_lists_vocabulary() {
        let prompt = build_relevance_prompt(&vocab(&["food", "travel"]));
        assert!(prompt.contains("Available tags: food, travel"));
        assert!(prompt.contains("relevant_tags"));
    }

    #[test]
    fn parse_filters_to_vocabulary() {
        let tags = parse_relevant_tags(r#"{"relevant_tags": ["Food", "weather", "food"]}"#, &vocab(&["food", "travel"]))
            .unwrap_or_default();
        assert_eq!(tags, vec!["food"]);
    }

    #[test]
    fn parse_falls_back_to_first_array_field() {
        let tags = parse_relevant_tags(r#"{"note": "x", "tags": ["travel"]}"#, &vocab(&["food", "travel"]))
            .unwrap_or_default();
        assert_eq!(tags, vec!["travel"]);
    }

    #[test]
    fn parse_accepts_fenced_reply() {
        let tags = parse_relevant_tags("```json\n{\"relevant_tags\": [\"food\"]}\n```", &vocab(&["food"]))
            .unwrap_or_default();
        assert_eq!(tags, vec!["food"]);
    }

    #[test]
    fn parse_rejects_bad_shapes() {
        let v = vocab(&["food"]);
        assert!(matches!(parse_relevant_tags("food", &v), Err(LlmError::JsonParse { .. })));
        assert!(matches!(parse_relevant_tags(r#"["food"]"#, &v), Err(LlmError::InvalidShape(_))));
        assert!(matches!(parse_relevant_tags(r#"{"relevant_tags": "food"}"#, &v), Err(LlmError::InvalidShape(_))));
    }
}
