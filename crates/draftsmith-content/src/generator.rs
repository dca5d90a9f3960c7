//! Core Generator implementation

use crate::config::GeneratorConfig;
use crate::error::GeneratorError;
use crate::normalizer::ContentNormalizer;
use crate::prompt::PromptBuilder;
use crate::types::{GenerationMetadata, GenerationRequest, GenerationResult};
use draftsmith_domain::traits::LlmProvider;
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// The Generator drafts blog posts through an LLM and normalizes the reply
pub struct Generator<L>
where
    L: LlmProvider,
{
    llm_provider: Arc<L>,
    normalizer: ContentNormalizer,
    config: GeneratorConfig,
    model_name: String,
}

impl<L> Generator<L>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    /// Create a new Generator
    pub fn new(llm_provider: L, config: GeneratorConfig) -> Self {
        Self {
            llm_provider: Arc::new(llm_provider),
            normalizer: ContentNormalizer::new(),
            config,
            model_name: "llm".to_string(),
        }
    }

    /// Create a new Generator with a specific model name
    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }

    /// Active configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Draft a blog post for the requested topic
    pub async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResult, GeneratorError> {
        self.config.validate().map_err(GeneratorError::Config)?;

        let topic = request.topic.trim().to_string();
        if topic.is_empty() {
            return Err(GeneratorError::InvalidTopic("topic is empty".to_string()));
        }
        let topic_len = topic.chars().count();
        if topic_len > self.config.max_topic_length {
            return Err(GeneratorError::TopicTooLong(
                topic_len,
                self.config.max_topic_length,
            ));
        }

        let started = Instant::now();

        info!("Starting draft generation for topic '{}'", topic);

        let builder = PromptBuilder::new(
            topic.clone(),
            request
                .target_words
                .unwrap_or(self.config.default_target_words),
        )
        .with_tone(request.tone)
        .with_audience(request.audience)
        .with_focus_keywords(request.focus_keywords);

        let system = builder.system_prompt();
        let prompt = builder.build();

        debug!("Prompt length: {} chars", prompt.len());

        // Call LLM with timeout
        let response = timeout(
            self.config.generation_timeout(),
            self.call_llm(system, &prompt),
        )
        .await
        .map_err(|_| GeneratorError::Timeout)??;

        debug!("LLM response length: {} chars", response.len());

        if self.config.reject_empty_response && response.trim().is_empty() {
            return Err(GeneratorError::EmptyResponse);
        }

        let (draft, strategy) = self.normalizer.normalize_with_strategy(&response, &topic);

        let issues = draft.validate();
        for issue in &issues {
            warn!("Draft for '{}': {}", topic, issue);
        }

        if !strategy.is_structured() {
            warn!("Model reply for '{}' had no JSON object; used it as plain content", topic);
        }

        let metadata = GenerationMetadata {
            topic,
            strategy,
            model_name: self.model_name.clone(),
            timestamp: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default(),
            processing_time_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            response_chars: response.chars().count(),
            issues,
        };

        info!(
            "Draft complete: '{}' via {} ({} words, {} issue(s))",
            draft.title,
            metadata.strategy,
            draft.word_count(),
            metadata.issues.len()
        );

        Ok(GenerationResult { draft, metadata })
    }

    /// Call the LLM provider
    async fn call_llm(&self, system: &str, prompt: &str) -> Result<String, GeneratorError> {
        let llm = Arc::clone(&self.llm_provider);
        let system = system.to_string();
        let prompt = prompt.to_string();

        // Call in a blocking context since LlmProvider is not async
        tokio::task::spawn_blocking(move || {
            llm.generate_with_system(&system, &prompt)
                .map_err(|e| GeneratorError::Llm(e.to_string()))
        })
        .await
        .map_err(|e| GeneratorError::Llm(format!("Task join error: {}", e)))?
    }
}
