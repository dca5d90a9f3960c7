//! Blog draft record - the output of content normalization

use std::fmt;

/// Maximum length (in chars) of an excerpt or SEO description before truncation
pub const SUMMARY_MAX_CHARS: usize = 160;

/// A truncated summary backs up to a word boundary only if that boundary
/// sits at or after this char index
pub const SUMMARY_MIN_CUT: usize = 100;

/// Titles longer than this are reported as advisory issues
pub const TITLE_RECOMMENDED_CHARS: usize = 60;

/// Average reading speed used for read-time estimates
pub const WORDS_PER_MINUTE: usize = 200;

/// Upper bound on keywords derived from a topic
pub const MAX_TOPIC_KEYWORDS: usize = 5;

/// Shortest topic token kept as a derived keyword
pub const MIN_TOPIC_KEYWORD_CHARS: usize = 4;

/// A structured blog post draft
///
/// Built fresh on every normalization call and handed to the caller, who owns
/// it exclusively. Nothing in this workspace mutates a draft after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogDraft {
    /// Post title
    pub title: String,

    /// Post body in Markdown
    pub content: String,

    /// Short teaser shown in listings
    pub excerpt: String,

    /// Meta description for search engines
    pub seo_description: String,

    /// Lower-cased keywords in source order
    pub keywords: Vec<String>,

    /// Estimated reading time, at least one minute
    pub estimated_read_minutes: u32,
}

/// An invariant a draft does not satisfy
///
/// Issues are advisory: normalization always yields a draft, and callers
/// decide whether an issue blocks persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftIssue {
    /// Title is empty or whitespace
    EmptyTitle,

    /// Content is empty or whitespace
    EmptyContent,

    /// Title is longer than the recommended length (chars)
    TitleLong(usize),

    /// Excerpt exceeds the summary limit (chars)
    ExcerptTooLong(usize),

    /// SEO description exceeds the summary limit (chars)
    SeoDescriptionTooLong(usize),

    /// Keyword list is empty
    NoKeywords,

    /// Read time is zero
    ZeroReadTime,
}

impl fmt::Display for DraftIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftIssue::EmptyTitle => write!(f, "title is empty"),
            DraftIssue::EmptyContent => write!(f, "content is empty"),
            DraftIssue::TitleLong(len) => write!(
                f,
                "title is {} chars (recommended max {})",
                len, TITLE_RECOMMENDED_CHARS
            ),
            DraftIssue::ExcerptTooLong(len) => write!(
                f,
                "excerpt is {} chars (max {})",
                len, SUMMARY_MAX_CHARS
            ),
            DraftIssue::SeoDescriptionTooLong(len) => write!(
                f,
                "seo description is {} chars (max {})",
                len, SUMMARY_MAX_CHARS
            ),
            DraftIssue::NoKeywords => write!(f, "no keywords"),
            DraftIssue::ZeroReadTime => write!(f, "estimated read time is zero"),
        }
    }
}

impl BlogDraft {
    /// Check the draft against the record invariants
    ///
    /// Summaries may carry a trailing `...` after a 160-char cut, so the
    /// length check allows for it.
    pub fn validate(&self) -> Vec<DraftIssue> {
        let mut issues = Vec::new();

        if self.title.trim().is_empty() {
            issues.push(DraftIssue::EmptyTitle);
        } else {
            let len = self.title.chars().count();
            if len > TITLE_RECOMMENDED_CHARS {
                issues.push(DraftIssue::TitleLong(len));
            }
        }

        if self.content.trim().is_empty() {
            issues.push(DraftIssue::EmptyContent);
        }

        let excerpt_len = self.excerpt.chars().count();
        if excerpt_len > summary_limit() {
            issues.push(DraftIssue::ExcerptTooLong(excerpt_len));
        }

        let seo_len = self.seo_description.chars().count();
        if seo_len > summary_limit() {
            issues.push(DraftIssue::SeoDescriptionTooLong(seo_len));
        }

        if self.keywords.is_empty() {
            issues.push(DraftIssue::NoKeywords);
        }

        if self.estimated_read_minutes == 0 {
            issues.push(DraftIssue::ZeroReadTime);
        }

        issues
    }

    /// Whether the draft satisfies every invariant
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Number of whitespace-separated words in the content
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}

fn summary_limit() -> usize {
    SUMMARY_MAX_CHARS + "...".len()
}
