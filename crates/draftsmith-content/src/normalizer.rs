//! Turn raw model output into a blog draft
//!
//! Language models are asked for a JSON object but routinely wrap it in code
//! fences, surround it with chatter, or ignore the format entirely. The
//! normalizer tries progressively looser extraction strategies and, when all
//! of them fail, treats the reply as the post body. It never fails.

use crate::keywords::{normalize_keywords, topic_keywords};
use crate::markdown::{derive_excerpt, first_heading, read_time_minutes};
use draftsmith_domain::traits::DraftNormalizer;
use draftsmith_domain::{BlogDraft, ParseStrategy};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use tracing::debug;

type JsonObject = Map<String, Value>;

/// Fence patterns, tried in order
///
/// 1. the whole reply is a `json`-tagged fence
/// 2. the whole reply is an untagged fence
/// 3. a `json`-tagged fence anywhere
/// 4. an untagged fence anywhere whose body starts with `{`
static FENCE_PATTERNS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        Regex::new(r"(?s)^```(?i:json)\s*(.*?)\s*```$").expect("valid fence pattern"),
        Regex::new(r"(?s)^```\s*(.*?)\s*```$").expect("valid fence pattern"),
        Regex::new(r"(?s)```(?i:json)\s*(.*?)\s*```").expect("valid fence pattern"),
        Regex::new(r"(?s)```\s*(\{.*?\})\s*```").expect("valid fence pattern"),
    ]
});

/// Brace span holding a `title` key followed by a `content` key
static EMBEDDED_OBJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)\{.*?"title".*?"content".*\}"#).expect("valid object pattern")
});

const CONTENT_KEYS: &[&str] = &["content", "body"];
const TITLE_KEYS: &[&str] = &["title"];
const EXCERPT_KEYS: &[&str] = &["excerpt"];
const SEO_KEYS: &[&str] = &["seo_description", "meta_description", "seoDescription"];
const READ_TIME_KEYS: &[&str] = &[
    "estimated_read_time",
    "estimated_read_minutes",
    "estimatedReadTime",
    "read_time",
];

/// Normalizes free-text model output into [`BlogDraft`] records
///
/// Stateless; compiled patterns are shared process-wide, so one instance can
/// be used from any number of threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentNormalizer;

impl ContentNormalizer {
    /// Create a new normalizer
    pub fn new() -> Self {
        Self
    }

    /// Build a draft from raw model output
    ///
    /// `topic` labels the draft when the output carries no usable title and
    /// seeds keywords when none are given.
    pub fn normalize(&self, raw_text: &str, topic: &str) -> BlogDraft {
        self.normalize_with_strategy(raw_text, topic).0
    }

    /// Build a draft and report which extraction path produced it
    pub fn normalize_with_strategy(&self, raw_text: &str, topic: &str) -> (BlogDraft, ParseStrategy) {
        let trimmed = raw_text.trim();

        match extract_object(trimmed) {
            Some((object, strategy)) => {
                debug!("Parsed model output via {}", strategy);
                (draft_from_object(&object, topic), strategy)
            }
            None => {
                debug!("No JSON object in model output, using it as plain content");
                (draft_from_text(trimmed, topic), ParseStrategy::PlainText)
            }
        }
    }
}

impl DraftNormalizer for ContentNormalizer {
    fn normalize(&self, raw_text: &str, topic: &str) -> BlogDraft {
        ContentNormalizer::normalize(self, raw_text, topic)
    }
}

/// Normalize raw model output with a default [`ContentNormalizer`]
pub fn normalize(raw_text: &str, topic: &str) -> BlogDraft {
    ContentNormalizer::new().normalize(raw_text, topic)
}

/// Run the extraction strategies in order; first JSON object wins
fn extract_object(text: &str) -> Option<(JsonObject, ParseStrategy)> {
    for (idx, pattern) in FENCE_PATTERNS.iter().enumerate() {
        if let Some(caps) = pattern.captures(text) {
            match parse_object(&caps[1]) {
                Some(object) => return Some((object, ParseStrategy::FencedJson)),
                None => debug!("Fence pattern {} matched but did not parse", idx + 1),
            }
        }
    }

    if text.starts_with('{') {
        if let Some(end) = text.rfind('}') {
            if let Some(object) = parse_object(&text[..=end]) {
                return Some((object, ParseStrategy::RawJson));
            }
            debug!("Reply looks like raw JSON but did not parse");
        }
    }

    if let Some(found) = EMBEDDED_OBJECT.find(text) {
        if let Some(object) = parse_object(found.as_str()) {
            return Some((object, ParseStrategy::EmbeddedObject));
        }
        debug!("Embedded object candidate did not parse");
    }

    None
}

/// Parse text as JSON, accepting only objects
fn parse_object(candidate: &str) -> Option<JsonObject> {
    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(object)) => Some(object),
        _ => None,
    }
}

fn draft_from_object(object: &JsonObject, topic: &str) -> BlogDraft {
    let content = body_field(object).unwrap_or_default();

    let title = string_field(object, TITLE_KEYS)
        .or_else(|| first_heading(&content))
        .unwrap_or_else(|| topic.trim().to_string());

    let excerpt = string_field(object, EXCERPT_KEYS).unwrap_or_else(|| derive_excerpt(&content));
    let seo_description =
        string_field(object, SEO_KEYS).unwrap_or_else(|| derive_excerpt(&content));

    let keywords = normalize_keywords(object.get("keywords"), topic);

    let estimated_read_minutes =
        read_minutes_field(object).unwrap_or_else(|| read_time_minutes(&content));

    BlogDraft {
        title,
        content,
        excerpt,
        seo_description,
        keywords,
        estimated_read_minutes,
    }
}

fn draft_from_text(text: &str, topic: &str) -> BlogDraft {
    let title = first_heading(text).unwrap_or_else(|| topic.trim().to_string());
    let summary = derive_excerpt(text);

    BlogDraft {
        title,
        content: text.to_string(),
        excerpt: summary.clone(),
        seo_description: summary,
        keywords: topic_keywords(topic),
        estimated_read_minutes: read_time_minutes(text),
    }
}

/// First non-blank string value among `keys`, trimmed
fn string_field(object: &JsonObject, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| object.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

/// First non-blank body value, returned verbatim
///
/// Leading indentation in Markdown is significant, so only the blank check
/// looks at trimmed text.
fn body_field(object: &JsonObject) -> Option<String> {
    CONTENT_KEYS
        .iter()
        .filter_map(|key| object.get(*key).and_then(Value::as_str))
        .find(|value| !value.trim().is_empty())
        .map(str::to_string)
}

/// First positive read time among the known keys
fn read_minutes_field(object: &JsonObject) -> Option<u32> {
    READ_TIME_KEYS
        .iter()
        .filter_map(|key| object.get(*key))
        .filter_map(parse_minutes)
        .find(|minutes| *minutes >= 1)
        .map(|minutes| u32::try_from(minutes).unwrap_or(u32::MAX))
}

/// Accepts integers, positive floats (rounded up) and strings like "7" or "7 min"
fn parse_minutes(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f > 0.0)
                .map(|f| f.ceil() as u64)
        }),
        Value::String(s) => s.split_whitespace().next()?.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOPIC: &str = "Concrete Foundation Tips";

    #[test]
    fn test_json_round_trip() {
        let raw = r#"{"title":"T","content":"C","excerpt":"E","seo_description":"S","keywords":["a","b"],"estimated_read_time":7}"#;
        let (draft, strategy) = ContentNormalizer::new().normalize_with_strategy(raw, TOPIC);

        assert_eq!(strategy, ParseStrategy::RawJson);
        assert_eq!(
            draft,
            BlogDraft {
                title: "T".to_string(),
                content: "C".to_string(),
                excerpt: "E".to_string(),
                seo_description: "S".to_string(),
                keywords: vec!["a".to_string(), "b".to_string()],
                estimated_read_minutes: 7,
            }
        );
    }

    #[test]
    fn test_content_kept_verbatim() {
        let raw = r#"{"title":"T","content":"    indented code\n\nBody\n"}"#;
        let draft = normalize(raw, TOPIC);

        assert_eq!(draft.content, "    indented code\n\nBody\n");
        assert_eq!(draft.title, "T");
    }

    #[test]
    fn test_blank_content_falls_through_to_body() {
        let raw = r#"{"title":"T","content":"  \n ","body":"  Body text"}"#;
        let draft = normalize(raw, TOPIC);

        assert_eq!(draft.content, "  Body text");
    }

    #[test]
    fn test_bare_hash_first_line_uses_topic() {
        let draft = normalize("#\nTitle line\nBody.", TOPIC);
        assert_eq!(draft.title, TOPIC);
    }

    #[test]
    fn test_fenced_json() {
        let raw = "```json\n{\"title\":\"T\",\"content\":\"C\"}\n```";
        let (draft, strategy) = ContentNormalizer::new().normalize_with_strategy(raw, TOPIC);

        assert_eq!(strategy, ParseStrategy::FencedJson);
        assert_eq!(draft.title, "T");
        assert_eq!(draft.content, "C");
    }

    #[test]
    fn test_untagged_fence() {
        let raw = "```\n{\"title\":\"Untagged\",\"content\":\"Body\"}\n```";
        let (draft, strategy) = ContentNormalizer::new().normalize_with_strategy(raw, TOPIC);

        assert_eq!(strategy, ParseStrategy::FencedJson);
        assert_eq!(draft.title, "Untagged");
    }

    #[test]
    fn test_fence_inside_prose() {
        let raw = "Sure! Here is your post:\n\n```json\n{\"title\":\"Inside\",\"content\":\"Body text\"}\n```\n\nLet me know if you need edits.";
        let (draft, strategy) = ContentNormalizer::new().normalize_with_strategy(raw, TOPIC);

        assert_eq!(strategy, ParseStrategy::FencedJson);
        assert_eq!(draft.title, "Inside");
        assert_eq!(draft.content, "Body text");
    }

    #[test]
    fn test_untagged_fence_inside_prose() {
        let raw = "Here you go:\n```\n{\"title\":\"Loose\",\"content\":\"Body\"}\n```\nThanks";
        let (draft, strategy) = ContentNormalizer::new().normalize_with_strategy(raw, TOPIC);

        assert_eq!(strategy, ParseStrategy::FencedJson);
        assert_eq!(draft.title, "Loose");
    }

    #[test]
    fn test_uppercase_json_tag() {
        let raw = "```JSON\n{\"title\":\"Caps\",\"content\":\"Body\"}\n```";
        let draft = normalize(raw, TOPIC);
        assert_eq!(draft.title, "Caps");
    }

    #[test]
    fn test_raw_json_with_trailing_chatter() {
        let raw = "{\"title\":\"Raw\",\"content\":\"Body\"}\n\nHope this helps!";
        let (draft, strategy) = ContentNormalizer::new().normalize_with_strategy(raw, TOPIC);

        assert_eq!(strategy, ParseStrategy::RawJson);
        assert_eq!(draft.title, "Raw");
    }

    #[test]
    fn test_embedded_object() {
        let raw = "Here is the draft you asked for: {\"title\": \"Embedded\", \"content\": \"# Embedded\\n\\nBody\"} enjoy";
        let (draft, strategy) = ContentNormalizer::new().normalize_with_strategy(raw, TOPIC);

        assert_eq!(strategy, ParseStrategy::EmbeddedObject);
        assert_eq!(draft.title, "Embedded");
        assert_eq!(draft.content, "# Embedded\n\nBody");
    }

    #[test]
    fn test_body_key_and_heading_title() {
        let raw = r##"{"body": "# Heading From Body\n\nFirst paragraph."}"##;
        let draft = normalize(raw, TOPIC);

        assert_eq!(draft.content, "# Heading From Body\n\nFirst paragraph.");
        assert_eq!(draft.title, "Heading From Body");
        assert_eq!(draft.excerpt, "First paragraph.");
        assert_eq!(draft.seo_description, "First paragraph.");
        assert_eq!(draft.keywords, vec!["concrete", "foundation", "tips"]);
        assert_eq!(draft.estimated_read_minutes, 1);
    }

    #[test]
    fn test_meta_description_alias() {
        let raw = r#"{"title":"T","content":"C","meta_description":"Meta"}"#;
        assert_eq!(normalize(raw, TOPIC).seo_description, "Meta");
    }

    #[test]
    fn test_missing_content_uses_topic_title() {
        let raw = r#"{"excerpt":"E"}"#;
        let draft = normalize(raw, TOPIC);

        assert_eq!(draft.content, "");
        assert_eq!(draft.title, TOPIC);
        assert_eq!(draft.excerpt, "E");
        assert_eq!(draft.seo_description, "");
    }

    #[test]
    fn test_blank_title_falls_back() {
        let raw = r##"{"title":"   ","content":"# Real Title\nBody."}"##;
        assert_eq!(normalize(raw, TOPIC).title, "Real Title");
    }

    #[test]
    fn test_read_time_variants() {
        let cases = [
            (r#"{"content":"C","estimated_read_time":"6 min"}"#, 6),
            (r#"{"content":"C","estimated_read_time":2.2}"#, 3),
            (r#"{"content":"C","estimated_read_time":0}"#, 1),
            (r#"{"content":"C","estimated_read_time":-4}"#, 1),
            (r#"{"content":"C","read_time":4}"#, 4),
        ];
        for (raw, expected) in cases {
            assert_eq!(normalize(raw, TOPIC).estimated_read_minutes, expected, "{}", raw);
        }
    }

    #[test]
    fn test_heading_fallback_plain_text() {
        let raw = "# My Heading\nSome body text.";
        let (draft, strategy) = ContentNormalizer::new().normalize_with_strategy(raw, TOPIC);

        assert_eq!(strategy, ParseStrategy::PlainText);
        assert_eq!(draft.title, "My Heading");
        assert_eq!(draft.content, raw);
        assert_eq!(draft.excerpt, "Some body text.");
        assert_eq!(draft.keywords, vec!["concrete", "foundation", "tips"]);
    }

    #[test]
    fn test_plain_text_sentence_uses_topic() {
        let draft = normalize("Foundations crack for many reasons.", TOPIC);
        assert_eq!(draft.title, TOPIC);
    }

    #[test]
    fn test_malformed_fenced_json_degrades() {
        let raw = "```json\n{not valid json\n```\nActual content here.";
        let (draft, strategy) = ContentNormalizer::new().normalize_with_strategy(raw, TOPIC);

        assert_eq!(strategy, ParseStrategy::PlainText);
        assert_eq!(draft.content, raw);
        // First line is short and has no period, so it wins over the topic
        assert_eq!(draft.title, "```json");
    }

    #[test]
    fn test_truncated_json_degrades() {
        let raw = r#"{"title": "Cut off", "content": "The model stopped mid"#;
        let (draft, strategy) = ContentNormalizer::new().normalize_with_strategy(raw, TOPIC);

        assert_eq!(strategy, ParseStrategy::PlainText);
        assert_eq!(draft.content, raw);
    }

    #[test]
    fn test_json_array_is_not_a_draft() {
        let (_, strategy) = ContentNormalizer::new().normalize_with_strategy("[1, 2, 3]", TOPIC);
        assert_eq!(strategy, ParseStrategy::PlainText);
    }

    #[test]
    fn test_empty_input() {
        let draft = normalize("", TOPIC);

        assert_eq!(draft.title, TOPIC);
        assert_eq!(draft.content, "");
        assert_eq!(draft.excerpt, "");
        assert_eq!(draft.keywords, vec!["concrete", "foundation", "tips"]);
        assert_eq!(draft.estimated_read_minutes, 1);
    }

    #[test]
    fn test_plain_text_is_trimmed() {
        let draft = normalize("\n\n  # Title\nBody words here  \n", TOPIC);
        assert_eq!(draft.content, "# Title\nBody words here");
    }

    #[test]
    fn test_long_content_excerpt_truncated() {
        let content = "word ".repeat(60);
        let raw = serde_json::json!({ "title": "Long", "content": content }).to_string();
        let draft = normalize(&raw, TOPIC);

        assert!(draft.excerpt.chars().count() <= 163);
        assert!(draft.excerpt.ends_with("..."));
        assert_eq!(draft.excerpt, draft.seo_description);
    }

    #[test]
    fn test_trait_object_dispatch() {
        let normalizer: &dyn DraftNormalizer = &ContentNormalizer::new();
        let draft = normalizer.normalize("```json\n{\"title\":\"T\",\"content\":\"C\"}\n```", TOPIC);
        assert_eq!(draft.title, "T");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: normalization is total and always yields bounded summaries
        #[test]
        fn test_normalize_is_total(raw in any::<String>(), topic in "[A-Za-z]{1,12}( [A-Za-z]{1,12}){0,6}") {
            let draft = normalize(&raw, &topic);

            prop_assert!(draft.estimated_read_minutes >= 1);
            prop_assert!(!draft.title.is_empty());
        }

        /// Property: JSON-ish garbage never panics
        #[test]
        fn test_json_like_noise(raw in r#"[{}\[\]":,` a-z#*\n]{0,200}"#) {
            let draft = normalize(&raw, "Roof Repair");
            prop_assert!(draft.estimated_read_minutes >= 1);
        }

        /// Property: derived summaries stay within 160 chars plus ellipsis
        #[test]
        fn test_derived_summary_bounded(words in proptest::collection::vec("[a-z]{1,15}", 0..120)) {
            let raw = words.join(" ");
            let draft = normalize(&raw, "Deck Building Guide");

            prop_assert!(draft.excerpt.chars().count() <= 163);
            prop_assert!(draft.seo_description.chars().count() <= 163);
        }

        /// Property: structured output keeps provided fields verbatim
        #[test]
        fn test_structured_fields_preserved(title in "[A-Za-z][A-Za-z ]{0,40}[A-Za-z]", body in "[a-z]{1,10}( [a-z]{1,10}){0,50}") {
            let raw = serde_json::json!({ "title": title, "content": body }).to_string();
            let (draft, strategy) = ContentNormalizer::new().normalize_with_strategy(&raw, "Topic Here");

            prop_assert_eq!(strategy, ParseStrategy::RawJson);
            prop_assert_eq!(draft.title, title);
            prop_assert_eq!(draft.content, body);
        }
    }
}
