//! Error types for draft generation
//!
//! Normalization itself cannot fail; these cover the orchestration around it.

use thiserror::Error;

/// Errors that can occur while generating a draft
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Topic is empty or unusable
    #[error("Invalid topic: {0}")]
    InvalidTopic(String),

    /// Topic exceeds maximum length
    #[error("Topic too long: {0} chars (max: {1})")]
    TopicTooLong(usize, usize),

    /// Generation timeout
    #[error("Generation timeout")]
    Timeout,

    /// Provider returned nothing usable
    #[error("LLM returned an empty response")]
    EmptyResponse,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
