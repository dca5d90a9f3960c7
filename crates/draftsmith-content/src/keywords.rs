//! Keyword normalization

use draftsmith_domain::{MAX_TOPIC_KEYWORDS, MIN_TOPIC_KEYWORD_CHARS};
use serde_json::Value;

/// Normalize a parsed `keywords` value, falling back to the topic
///
/// A non-empty array is mapped to lower-cased, trimmed strings in source
/// order. Blank entries are dropped; duplicates are kept. Anything else
/// (missing, not an array, or nothing left after cleanup) yields
/// [`topic_keywords`].
pub fn normalize_keywords(value: Option<&Value>, topic: &str) -> Vec<String> {
    let keywords: Vec<String> = value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(keyword_text)
                .map(|keyword| keyword.to_lowercase().trim().to_string())
                .filter(|keyword| !keyword.is_empty())
                .collect()
        })
        .unwrap_or_default();

    if keywords.is_empty() {
        topic_keywords(topic)
    } else {
        keywords
    }
}

/// Derive keywords from a topic line
///
/// Keeps lower-cased whitespace tokens longer than three chars, at most five.
/// A topic made only of short words yields the whole topic as one keyword.
pub fn topic_keywords(topic: &str) -> Vec<String> {
    let lowered = topic.to_lowercase();
    let tokens: Vec<String> = lowered
        .split_whitespace()
        .filter(|token| token.chars().count() >= MIN_TOPIC_KEYWORD_CHARS)
        .take(MAX_TOPIC_KEYWORDS)
        .map(str::to_string)
        .collect();

    if !tokens.is_empty() {
        return tokens;
    }

    let whole = lowered.split_whitespace().collect::<Vec<_>>().join(" ");
    if whole.is_empty() {
        Vec::new()
    } else {
        vec![whole]
    }
}

/// String form of a keyword entry; strings are taken unquoted
fn keyword_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
