//! Read and patch the host's chat request body.
//!
//! The body is kept as a `serde_json::Value` so fields this crate does not know
//! about survive untouched. Only `messages` (an array of `{role, content}`) is
//! interpreted.

use serde_json::{Map, Value, json};

/// Role of a chat message.
pub const ROLE_SYSTEM: &str = "system";
pub const ROLE_USER: &str = "user";
pub const ROLE_ASSISTANT: &str = "assistant";

/// Messages of a body, `None` when the body is not an object or has no array.
#[must_use]
pub fn body_messages(body: &Value) -> Option<&Vec<Value>> {
    body.get("messages").and_then(Value::as_array)
}

fn body_messages_mut(body: &mut Value) -> Option<&mut Vec<Value>> {
    body.get_mut("messages").and_then(Value::as_array_mut)
}

/// Role string of a message, empty when absent.
#[must_use]
pub fn message_role(message: &Value) -> &str {
    message.get("role").and_then(Value::as_str).unwrap_or("")
}

/// Text of a message's `content`.
///
/// Plain strings are returned as is; multi-part content contributes the `text`
/// of every `{"type": "text"}` part, joined with newlines.
#[must_use]
pub fn message_text(message: &Value) -> String {
    match message.get("content") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(parts)) => parts
            .iter()
            .filter(|p| p.get("type").and_then(Value::as_str) == Some("text"))
            .filter_map(|p| p.get("text").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join("\n"),
        _ => String::new(),
    }
}

/// Trimmed text of the latest user-authored message, `None` when there is none
/// or it is blank.
#[must_use]
pub fn latest_user_text(body: &Value) -> Option<String> {
    body_messages(body)?
        .iter()
        .rev()
        .find(|m| message_role(m) == ROLE_USER)
        .map(message_text)
        .map(|t| t.trim().to_owned())
        .filter(|t| !t.is_empty())
}

/// The last two messages as `(user, assistant)` text, for the add-memory action.
#[must_use]
pub fn last_exchange(body: &Value) -> Option<(String, String)> {
    let messages = body_messages(body)?;
    let [.., user, assistant] = messages.as_slice() else {
        return None;
    };
    Some((message_text(user), message_text(assistant)))
}

/// Add `text` to the system prompt of a body.
///
/// Appends to the first message when it is a system message, otherwise inserts a
/// new system message at the front. Returns `false` when the body has no
/// messages array.
pub fn splice_system_message(body: &mut Value, text: &str) -> bool {
    let Some(messages) = body_messages_mut(body) else {
        return false;
    };

    match messages.first_mut() {
        Some(first) if message_role(first) == ROLE_SYSTEM => {
            append_to_content(first, text);
        },
        _ => messages.insert(0, json!({"role": ROLE_SYSTEM, "content": text})),
    }
    true
}

fn append_to_content(message: &mut Value, text: &str) {
    let Some(obj) = message.as_object_mut() else {
        return;
    };
    match obj.get_mut("content") {
        Some(Value::String(existing)) if existing.trim().is_empty() => *existing = text.to_owned(),
        Some(Value::String(existing)) => {
            existing.push_str("\n\n");
            existing.push_str(text);
        },
        Some(Value::Array(parts)) => parts.push(json!({"type": "text", "text": text})),
        _ => {
            obj.insert("content".to_owned(), Value::String(text.to_owned()));
        },
    }
}

/// Append an assistant message to a body. Returns `false` when the body has no
/// messages array.
pub fn append_assistant_message(body: &mut Value, text: &str) -> bool {
    let Some(messages) = body_messages_mut(body) else {
        return false;
    };
    let mut message = Map::new();
    message.insert("role".to_owned(), Value::String(ROLE_ASSISTANT.to_owned()));
    message.insert("content".to_owned(), Value::String(text.to_owned()));
    messages.push(Value::Object(message));
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_user_text_picks_last_user() {
        let body = json!({"messages": [
            {"role": "user", "content": "first"},
            {"role": "assistant", "content": "reply"},
            {"role": "user", "content": "  second  "},
            {"role": "assistant", "content": "pending"}
        ]});
        assert_eq!(latest_user_text(&body).as_deref(), Some("second"));
    }

    #[test]
    fn test_latest_user_text_multipart() {
        let body = json!({"messages": [{"role": "user", "content": [
            {"type": "text", "text": "look at this"},
            {"type": "image_url", "image_url": {"url": "data:..."}},
            {"type": "text", "text": "and remember it"}
        ]}]});
        assert_eq!(latest_user_text(&body).as_deref(), Some("look at this\nand remember it"));
    }

    #[test]
    fn test_latest_user_text_absent_or_blank() {
        assert!(latest_user_text(&json!({})).is_none());
        assert!(latest_user_text(&json!({"messages": []})).is_none());
        assert!(latest_user_text(&json!({"messages": [{"role": "user", "content": "  "}]})).is_none());
        assert!(latest_user_text(&json!("not an object")).is_none());
    }

    #[test]
    fn test_splice_prepends_when_no_system() {
        let mut body = json!({"model": "m", "messages": [{"role": "user", "content": "hi"}]});
        assert!(splice_system_message(&mut body, "memories"));
        assert_eq!(body["messages"][0], json!({"role": "system", "content": "memories"}));
        assert_eq!(body["messages"][1]["content"], "hi");
        assert_eq!(body["model"], "m");
    }

    #[test]
    fn test_splice_appends_to_existing_system() {
        let mut body = json!({"messages": [
            {"role": "system", "content": "Be brief."},
            {"role": "user", "content": "hi"}
        ]});
        assert!(splice_system_message(&mut body, "memories"));
        let messages = body_messages(&body).map(Vec::len);
        assert_eq!(messages, Some(2));
        assert_eq!(body["messages"][0]["content"], "Be brief.\n\nmemories");
    }

    #[test]
    fn test_splice_appends_part_to_multipart_system() {
        let mut body = json!({"messages": [
            {"role": "system", "content": [{"type": "text", "text": "Be brief."}]}
        ]});
        assert!(splice_system_message(&mut body, "memories"));
        assert_eq!(body["messages"][0]["content"][1], json!({"type": "text", "text": "memories"}));
    }

    #[test]
    fn test_splice_without_messages() {
        let mut body = json!({"model": "m"});
        assert!(!splice_system_message(&mut body, "memories"));
        assert_eq!(body, json!({"model": "m"}));
    }

    #[test]
    fn test_append_assistant_message() {
        let mut body = json!({"messages": [{"role": "user", "content": "hi"}]});
        assert!(append_assistant_message(&mut body, "noted"));
        assert_eq!(body["messages"][1], json!({"role": "assistant", "content": "noted"}));
    }

    #[test]
    fn test_last_exchange() {
        let body = json!({"messages": [
            {"role": "user", "content": "q"},
            {"role": "assistant", "content": "a"}
        ]});
        assert_eq!(last_exchange(&body), Some(("q".to_owned(), "a".to_owned())));
        assert_eq!(last_exchange(&json!({"messages": [{"role": "user", "content": "q"}]})), None);
    }
}
