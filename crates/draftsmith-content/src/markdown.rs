//! Markdown helpers: titles, summaries and reading time

use draftsmith_domain::{SUMMARY_MAX_CHARS, SUMMARY_MIN_CUT, WORDS_PER_MINUTE};
use regex::Regex;
use std::sync::LazyLock;

/// First-line title candidates must be shorter than this (chars)
const FIRST_LINE_TITLE_LIMIT: usize = 100;

static H1: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#[ \t]+(\S.*)$").expect("valid H1 pattern"));

static H2: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^##[ \t]+(\S.*)$").expect("valid H2 pattern"));

static HEADING_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#{1,6}(?:[ \t].*)?$").expect("valid heading pattern"));

static LIST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*[-*][ \t]+").expect("valid list pattern"));

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid bold pattern"));

static ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.+?)\*").expect("valid italic pattern"));

static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\([^)]*\)").expect("valid link pattern"));

static LINE_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]*[\r\n]+[ \t]*").expect("valid newline pattern"));

/// Find a title in Markdown text
///
/// Prefers the first H1, then the first H2. Without headings, the first line
/// is used if it is short and does not read like a sentence (no trailing
/// period). Returns `None` when nothing qualifies.
pub fn first_heading(text: &str) -> Option<String> {
    for pattern in [&*H1, &*H2] {
        if let Some(caps) = pattern.captures(text) {
            let heading = caps[1].trim();
            if !heading.is_empty() {
                return Some(heading.to_string());
            }
        }
    }

    let first_line = text.trim().lines().next()?.trim();
    let bare_marker = first_line.chars().all(|c| c == '#');
    if !bare_marker
        && first_line.chars().count() < FIRST_LINE_TITLE_LIMIT
        && !first_line.ends_with('.')
    {
        Some(first_line.to_string())
    } else {
        None
    }
}

/// Strip Markdown syntax down to flowing plain text
///
/// Heading lines are dropped entirely, emphasis and links are unwrapped, list
/// markers are removed, and line breaks collapse to single spaces.
pub fn strip_markdown(text: &str) -> String {
    let text = HEADING_LINE.replace_all(text, "");
    let text = LIST_MARKER.replace_all(&text, "");
    let text = BOLD.replace_all(&text, "$1");
    let text = ITALIC.replace_all(&text, "$1");
    let text = LINK.replace_all(&text, "$1");
    let text = LINE_BREAKS.replace_all(text.trim(), " ");
    text.trim().to_string()
}

/// Shorten plain text to a summary of at most 160 chars plus `...`
///
/// The cut backs up to the last space when that space is at char index 100
/// or later; otherwise the hard 160-char cut is kept.
pub fn truncate_summary(text: &str) -> String {
    if text.chars().count() <= SUMMARY_MAX_CHARS {
        return text.to_string();
    }

    let truncated: String = text.chars().take(SUMMARY_MAX_CHARS).collect();
    let kept = match truncated.rfind(' ') {
        Some(idx) if truncated[..idx].chars().count() >= SUMMARY_MIN_CUT => &truncated[..idx],
        _ => truncated.as_str(),
    };

    format!("{}...", kept.trim_end())
}

/// Derive an excerpt from Markdown content
pub fn derive_excerpt(content: &str) -> String {
    truncate_summary(&strip_markdown(content))
}

/// Estimate reading time in whole minutes, never less than one
pub fn read_time_minutes(content: &str) -> u32 {
    let words = content.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}
