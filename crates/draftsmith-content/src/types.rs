//! Request and response types for draft generation

use draftsmith_domain::{BlogDraft, DraftIssue, ParseStrategy};

/// Request to draft a blog post
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    /// Subject of the post; also the fallback title
    pub topic: String,

    /// Writing tone (e.g. "friendly", "technical")
    pub tone: Option<String>,

    /// Intended readers
    pub audience: Option<String>,

    /// Approximate length in words; the config default applies when unset
    pub target_words: Option<usize>,

    /// Keywords the post should work in
    pub focus_keywords: Vec<String>,
}

impl GenerationRequest {
    /// Create a request for a topic with default options
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            ..Self::default()
        }
    }

    /// Set the writing tone
    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = Some(tone.into());
        self
    }

    /// Set the intended audience
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    /// Set the target length in words
    pub fn with_target_words(mut self, words: usize) -> Self {
        self.target_words = Some(words);
        self
    }

    /// Set keywords to work into the post
    pub fn with_focus_keywords(mut self, keywords: Vec<String>) -> Self {
        self.focus_keywords = keywords;
        self
    }
}

/// Result of a generation
#[derive(Debug, Clone)]
pub struct GenerationResult {
    /// The normalized draft
    pub draft: BlogDraft,

    /// Metadata about the generation
    pub metadata: GenerationMetadata,
}

/// Metadata about a generation
#[derive(Debug, Clone)]
pub struct GenerationMetadata {
    /// Topic the draft was generated for
    pub topic: String,

    /// Extraction path that produced the draft
    pub strategy: ParseStrategy,

    /// Name of the LLM model used
    pub model_name: String,

    /// Unix timestamp (seconds) when generation finished
    pub timestamp: u64,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,

    /// Length of the raw model reply (chars)
    pub response_chars: usize,

    /// Invariants the draft does not meet
    pub issues: Vec<DraftIssue>,
}
