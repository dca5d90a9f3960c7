//! Parse strategy - which extraction path produced a draft

use std::fmt;

/// Extraction path that yielded a draft
///
/// Strategies are attempted in declaration order; the first one that yields a
/// JSON object wins:
/// - FencedJson: JSON inside a Markdown code fence
/// - RawJson: the reply itself is a JSON object
/// - EmbeddedObject: a JSON object with `title` and `content` keys inside prose
/// - PlainText: no usable JSON, the reply is treated as the post body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseStrategy {
    /// JSON captured from a fenced code block
    FencedJson,

    /// Reply starts with `{` and parses up to its last `}`
    RawJson,

    /// Object found by scanning for `title`/`content` keys
    EmbeddedObject,

    /// Fallback: reply used verbatim as Markdown content
    PlainText,
}

impl ParseStrategy {
    /// Get the strategy name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseStrategy::FencedJson => "fenced_json",
            ParseStrategy::RawJson => "raw_json",
            ParseStrategy::EmbeddedObject => "embedded_object",
            ParseStrategy::PlainText => "plain_text",
        }
    }

    /// Whether the draft was built from structured model output
    pub fn is_structured(&self) -> bool {
        !matches!(self, ParseStrategy::PlainText)
    }
}

impl fmt::Display for ParseStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_as_str() {
        assert_eq!(ParseStrategy::FencedJson.as_str(), "fenced_json");
        assert_eq!(ParseStrategy::RawJson.as_str(), "raw_json");
        assert_eq!(ParseStrategy::EmbeddedObject.as_str(), "embedded_object");
        assert_eq!(ParseStrategy::PlainText.as_str(), "plain_text");
    }

    #[test]
    fn test_structured() {
        assert!(ParseStrategy::FencedJson.is_structured());
        assert!(ParseStrategy::EmbeddedObject.is_structured());
        assert!(!ParseStrategy::PlainText.is_structured());
    }

    #[test]
    fn test_display_matches_as_str() {
        assert_eq!(ParseStrategy::RawJson.to_string(), "raw_json");
    }
}
