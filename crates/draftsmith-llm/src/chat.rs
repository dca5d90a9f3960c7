//! Chat Provider Implementation
//!
//! One HTTP adapter for every hosted provider. The provider kind selects the
//! request URL, credential headers, JSON body shape and the path to the
//! generated text in the reply.
//!
//! # Features
//!
//! - Async HTTP communication via `reqwest`
//! - Retry logic with exponential backoff for transient failures
//! - Timeout handling
//!
//! # Examples
//!
//! ```no_run
//! use draftsmith_llm::{ChatProvider, ProviderKind, ProviderSettings};
//!
//! # async fn example() -> Result<(), draftsmith_llm::LlmError> {
//! let settings = ProviderSettings::new(ProviderKind::Ollama).with_model("llama3");
//! let provider = ChatProvider::new(settings)?;
//! let text = provider.complete(None, "Write a haiku about rebar").await?;
//! # Ok(())
//! # }
//! ```

use crate::provider::{ProviderKind, ProviderSettings};
use crate::LlmError;
use draftsmith_domain::traits::LlmProvider as LlmProviderTrait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Anthropic API version header value
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// HTTP adapter for hosted and local LLM providers
pub struct ChatProvider {
    settings: ProviderSettings,
    client: reqwest::Client,
}

impl ChatProvider {
    /// Create a new provider
    ///
    /// # Errors
    ///
    /// Returns error if the provider needs an API key and none is set, or
    /// if the HTTP client cannot be built.
    pub fn new(settings: ProviderSettings) -> Result<Self, LlmError> {
        let has_key = settings
            .api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty());
        if settings.kind.requires_api_key() && !has_key {
            return Err(LlmError::MissingApiKey(settings.kind.to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { settings, client })
    }

    /// Settings this provider was built with
    pub fn settings(&self) -> &ProviderSettings {
        &self.settings
    }

    /// Model identifier
    pub fn model(&self) -> &str {
        &self.settings.model
    }

    /// Full request URL for the configured provider
    pub fn request_url(&self) -> String {
        let base = self.settings.endpoint();
        match self.settings.kind {
            ProviderKind::OpenAi => format!("{}/v1/chat/completions", base),
            ProviderKind::Anthropic => format!("{}/v1/messages", base),
            ProviderKind::Gemini => format!(
                "{}/v1beta/models/{}:generateContent",
                base, self.settings.model
            ),
            ProviderKind::Ollama => format!("{}/api/generate", base),
        }
    }

    /// Provider-specific headers, credentials included
    pub fn request_headers(&self) -> Vec<(&'static str, String)> {
        let key = self.settings.api_key.clone().unwrap_or_default();
        match self.settings.kind {
            ProviderKind::OpenAi => vec![("authorization", format!("Bearer {}", key))],
            ProviderKind::Anthropic => vec![
                ("x-api-key", key),
                ("anthropic-version", ANTHROPIC_VERSION.to_string()),
            ],
            ProviderKind::Gemini => vec![("x-goog-api-key", key)],
            ProviderKind::Ollama => Vec::new(),
        }
    }

    /// Provider-specific JSON request body
    pub fn request_body(&self, system: Option<&str>, prompt: &str) -> Value {
        let s = &self.settings;
        match s.kind {
            ProviderKind::OpenAi => {
                let mut messages = Vec::new();
                if let Some(system) = system {
                    messages.push(json!({ "role": "system", "content": system }));
                }
                messages.push(json!({ "role": "user", "content": prompt }));
                json!({
                    "model": s.model,
                    "messages": messages,
                    "temperature": s.temperature,
                    "max_tokens": s.max_tokens,
                })
            }
            ProviderKind::Anthropic => {
                let mut body = json!({
                    "model": s.model,
                    "max_tokens": s.max_tokens,
                    "temperature": s.temperature,
                    "messages": [{ "role": "user", "content": prompt }],
                });
                if let Some(system) = system {
                    body["system"] = json!(system);
                }
                body
            }
            ProviderKind::Gemini => {
                let mut body = json!({
                    "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
                    "generationConfig": {
                        "temperature": s.temperature,
                        "maxOutputTokens": s.max_tokens,
                    },
                });
                if let Some(system) = system {
                    body["systemInstruction"] = json!({ "parts": [{ "text": system }] });
                }
                body
            }
            ProviderKind::Ollama => {
                let mut body = json!({
                    "model": s.model,
                    "prompt": prompt,
                    "stream": false,
                    "options": {
                        "temperature": s.temperature,
                        "num_predict": s.max_tokens,
                    },
                });
                if let Some(system) = system {
                    body["system"] = json!(system);
                }
                body
            }
        }
    }

    /// Generate text from the configured provider
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The provider is unreachable after all attempts
    /// - Credentials are rejected
    /// - The model is not available
    /// - The reply has no text where the provider puts it
    pub async fn complete(&self, system: Option<&str>, prompt: &str) -> Result<String, LlmError> {
        let url = self.request_url();
        let body = self.request_body(system, prompt);
        let attempts_allowed = self.settings.max_retries.max(1);

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < attempts_allowed {
            debug!(
                "Sending {} request (attempt {}/{})",
                self.settings.kind,
                attempts + 1,
                attempts_allowed
            );

            let mut request = self.client.post(&url).json(&body);
            for (name, value) in self.request_headers() {
                request = request.header(name, value);
            }

            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let reply: Value = response.json().await.map_err(|e| {
                            LlmError::InvalidResponse(format!("Failed to parse response: {}", e))
                        })?;
                        return extract_reply(self.settings.kind, &reply);
                    }

                    let error_text = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());

                    if status == StatusCode::NOT_FOUND {
                        return Err(LlmError::ModelNotAvailable(self.settings.model.clone()));
                    } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                        return Err(LlmError::Unauthorized(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    } else if status == StatusCode::TOO_MANY_REQUESTS {
                        last_error = Some(LlmError::RateLimitExceeded);
                    } else if status.is_server_error() {
                        last_error = Some(LlmError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    } else {
                        // Other client errors will not succeed on retry
                        return Err(LlmError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
                Err(e) => {
                    last_error = Some(LlmError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < attempts_allowed {
                // Exponential backoff: 1s, 2s, 4s, etc.
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                warn!(
                    "{} request failed, retrying in {}s",
                    self.settings.kind,
                    delay.as_secs()
                );
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
    }

    /// Drive `complete` to completion from synchronous code
    ///
    /// Must not be called from inside an async task; use `spawn_blocking`.
    fn complete_blocking(&self, system: Option<&str>, prompt: &str) -> Result<String, LlmError> {
        block_on(self.complete(system, prompt))
    }
}

fn block_on<F, T>(future: F) -> Result<T, LlmError>
where
    F: Future<Output = Result<T, LlmError>>,
{
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => handle.block_on(future),
        Err(_) => tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to start runtime: {}", e)))?
            .block_on(future),
    }
}

/// Pull the generated text out of a provider reply
pub fn extract_reply(kind: ProviderKind, reply: &Value) -> Result<String, LlmError> {
    let text = match kind {
        ProviderKind::OpenAi => reply
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .map(str::to_string),
        ProviderKind::Anthropic => join_text_parts(reply.get("content"), "text"),
        ProviderKind::Gemini => {
            join_text_parts(reply.pointer("/candidates/0/content/parts"), "text")
        }
        ProviderKind::Ollama => reply
            .get("response")
            .and_then(Value::as_str)
            .map(str::to_string),
    };

    text.ok_or_else(|| {
        LlmError::InvalidResponse(format!("No generated text in {} reply", kind))
    })
}

/// Concatenate the `field` strings of an array of content parts
fn join_text_parts(parts: Option<&Value>, field: &str) -> Option<String> {
    let parts = parts?.as_array()?;
    let texts: Vec<&str> = parts
        .iter()
        .filter_map(|part| part.get(field).and_then(Value::as_str))
        .collect();
    if texts.is_empty() {
        None
    } else {
        Some(texts.concat())
    }
}

impl LlmProviderTrait for ChatProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.complete_blocking(None, prompt)
    }

    fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String, Self::Error> {
        self.complete_blocking(Some(system), prompt)
    }
}
