//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Implementations live in other crates.

use crate::BlogDraft;

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (draftsmith-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate text completion
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Generate text completion with a separate system instruction
    fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String, Self::Error>;
}

/// Trait for turning raw model output into a blog draft
///
/// Implemented by the application layer (draftsmith-content). Implementations
/// are total: every input yields a draft.
pub trait DraftNormalizer {
    /// Normalize raw model output, using `topic` as the fallback label
    fn normalize(&self, raw_text: &str, topic: &str) -> BlogDraft;
}
