//! The `[Tags: a, b] content` encoding used to keep tags inside a memory's
//! free-text content.
//!
//! This is the only place that knows the format. Everything else goes through
//! [`format_tagged_content`] and [`parse_tagged_content`].

use std::sync::LazyLock;

use regex::Regex;

#[expect(clippy::unwrap_used, reason = "static regex pattern is compile-time validated")]
static TAGS_PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\[Tags:\s*([^\]]*)\]\s?").unwrap());

/// Normalize tags: trim, lowercase, drop empties, dedupe keeping first occurrence.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim().to_lowercase();
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

/// Encode tags into stored content. Empty tag lists leave the content as is.
#[must_use]
pub fn format_tagged_content(tags: &[String], content: &str) -> String {
    if tags.is_empty() {
        content.to_owned()
    } else {
        format!("[Tags: {}] {content}", tags.join(", "))
    }
}

/// Split stored content into its tags and body.
///
/// Content without a leading `[Tags: ...]` segment has no tags and is returned whole.
#[must_use]
pub fn parse_tagged_content(stored: &str) -> (Vec<String>, &str) {
    match TAGS_PREFIX_REGEX.captures(stored) {
        Some(caps) => {
            let tags = caps.get(1).map_or_else(Vec::new, |m| normalize_tags(m.as_str().split(',')));
            let body_start = caps.get(0).map_or(0, |m| m.end());
            (tags, stored.get(body_start..).unwrap_or(""))
        },
        None => (Vec::new(), stored),
    }
}
