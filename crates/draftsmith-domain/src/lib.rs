//! Draftsmith Domain Layer
//!
//! This crate holds the blog draft record and the trait boundaries that the
//! rest of the workspace builds on. It has ZERO external dependencies.
//!
//! ## Key Concepts
//!
//! - **BlogDraft**: The structured record produced from a model's free-text reply
//! - **ParseStrategy**: Which extraction path produced a draft
//! - **DraftIssue**: Advisory report of an invariant a draft does not meet
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Pure data and rules only
//! - Provider and normalizer implementations live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod draft;
pub mod strategy;
pub mod traits;

// Re-exports for convenience
pub use draft::{
    BlogDraft, DraftIssue, MAX_TOPIC_KEYWORDS, MIN_TOPIC_KEYWORD_CHARS, SUMMARY_MAX_CHARS,
    SUMMARY_MIN_CUT, TITLE_RECOMMENDED_CHARS, WORDS_PER_MINUTE,
};
pub use strategy::ParseStrategy;
