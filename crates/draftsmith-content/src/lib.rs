//! Draftsmith Content
//!
//! Turns language-model output into structured blog drafts.
//!
//! # Overview
//!
//! Models are asked for a JSON object describing a post, but what comes back
//! drifts: fenced code blocks, leading chatter, truncated JSON, or plain
//! Markdown. [`ContentNormalizer`] absorbs that drift and always returns a
//! fully populated [`BlogDraft`](draftsmith_domain::BlogDraft).
//! [`Generator`] wraps prompt building, the provider call and normalization.
//!
//! # Architecture
//!
//! ```text
//! Topic → PromptBuilder → LLM → raw text → ContentNormalizer → BlogDraft → caller
//! ```
//!
//! # Example Usage
//!
//! ```
//! use draftsmith_content::normalize;
//!
//! let draft = normalize(
//!     "```json\n{\"title\":\"Winter Concrete\",\"content\":\"Keep it warm.\"}\n```",
//!     "Concrete Foundation Tips",
//! );
//! assert_eq!(draft.title, "Winter Concrete");
//! assert_eq!(draft.keywords, vec!["concrete", "foundation", "tips"]);
//! ```
//!
//! ```no_run
//! use draftsmith_content::{GenerationRequest, Generator, GeneratorConfig};
//! use draftsmith_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let generator = Generator::new(MockProvider::new("# Title\nBody"), GeneratorConfig::default());
//! let result = generator.generate(GenerationRequest::new("Roof Maintenance")).await?;
//! println!("{} ({})", result.draft.title, result.metadata.strategy);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod generator;
pub mod keywords;
pub mod markdown;
mod normalizer;
mod prompt;
mod types;


pub use config::GeneratorConfig;
pub use error::GeneratorError;
pub use generator::Generator;
pub use normalizer::{normalize, ContentNormalizer};
pub use prompt::PromptBuilder;
pub use types::{GenerationMetadata, GenerationRequest, GenerationResult};
