//! Provider kinds and connection settings
//!
//! Each hosted provider differs only in where requests go, how credentials
//! are sent, and the JSON shape of requests and replies. This module holds the
//! static side of that table; [`crate::chat`] holds the request/reply shapes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default timeout for LLM requests (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default number of attempts per request
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default completion budget, sized for a long-form post
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Supported LLM provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI chat completions API
    #[serde(rename = "openai")]
    OpenAi,

    /// Anthropic messages API
    Anthropic,

    /// Google Gemini generateContent API
    Gemini,

    /// Local Ollama generate API
    Ollama,
}

impl ProviderKind {
    /// All supported providers
    pub const ALL: [ProviderKind; 4] = [
        ProviderKind::OpenAi,
        ProviderKind::Anthropic,
        ProviderKind::Gemini,
        ProviderKind::Ollama,
    ];

    /// Get the provider name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Gemini => "gemini",
            ProviderKind::Ollama => "ollama",
        }
    }

    /// Parse a provider name, accepting common aliases
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "openai" | "gpt" => Some(ProviderKind::OpenAi),
            "anthropic" | "claude" => Some(ProviderKind::Anthropic),
            "gemini" | "google" => Some(ProviderKind::Gemini),
            "ollama" => Some(ProviderKind::Ollama),
            _ => None,
        }
    }

    /// Base URL used when no endpoint override is configured
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "https://api.openai.com",
            ProviderKind::Anthropic => "https://api.anthropic.com",
            ProviderKind::Gemini => "https://generativelanguage.googleapis.com",
            ProviderKind::Ollama => "http://localhost:11434",
        }
    }

    /// Model used when none is configured
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "gpt-4o-mini",
            ProviderKind::Anthropic => "claude-3-5-haiku-latest",
            ProviderKind::Gemini => "gemini-1.5-flash",
            ProviderKind::Ollama => "llama3",
        }
    }

    /// Environment variable conventionally holding this provider's key
    pub fn default_api_key_env(&self) -> Option<&'static str> {
        match self {
            ProviderKind::OpenAi => Some("OPENAI_API_KEY"),
            ProviderKind::Anthropic => Some("ANTHROPIC_API_KEY"),
            ProviderKind::Gemini => Some("GEMINI_API_KEY"),
            ProviderKind::Ollama => None,
        }
    }

    /// Whether requests must carry an API key
    pub fn requires_api_key(&self) -> bool {
        !matches!(self, ProviderKind::Ollama)
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown provider: {}", s))
    }
}

/// Connection and sampling settings for a [`crate::ChatProvider`]
#[derive(Clone)]
pub struct ProviderSettings {
    /// Which provider to talk to
    pub kind: ProviderKind,

    /// Model identifier
    pub model: String,

    /// API key, if the provider needs one
    pub api_key: Option<String>,

    /// Base URL override
    pub endpoint: Option<String>,

    /// Sampling temperature
    pub temperature: f32,

    /// Completion token budget
    pub max_tokens: u32,

    /// Per-request timeout (seconds)
    pub timeout_secs: u64,

    /// Attempts per request, including the first
    pub max_retries: u32,
}

impl ProviderSettings {
    /// Settings with the provider's default model and endpoint
    pub fn new(kind: ProviderKind) -> Self {
        Self {
            kind,
            model: kind.default_model().to_string(),
            api_key: None,
            endpoint: None,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Set the model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Override the base URL
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the maximum number of attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Effective base URL without a trailing slash
    pub fn endpoint(&self) -> &str {
        self.endpoint
            .as_deref()
            .unwrap_or_else(|| self.kind.default_endpoint())
            .trim_end_matches('/')
    }
}

impl fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("kind", &self.kind)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parse_aliases() {
        assert_eq!(ProviderKind::parse("OpenAI"), Some(ProviderKind::OpenAi));
        assert_eq!(ProviderKind::parse("gpt"), Some(ProviderKind::OpenAi));
        assert_eq!(ProviderKind::parse("claude"), Some(ProviderKind::Anthropic));
        assert_eq!(ProviderKind::parse(" google "), Some(ProviderKind::Gemini));
        assert_eq!(ProviderKind::parse("ollama"), Some(ProviderKind::Ollama));
        assert_eq!(ProviderKind::parse("watson"), None);
    }

    #[test]
    fn test_provider_round_trip_names() {
        for kind in ProviderKind::ALL {
            assert_eq!(kind.as_str().parse::<ProviderKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_api_key_requirements() {
        assert!(ProviderKind::OpenAi.requires_api_key());
        assert!(ProviderKind::Anthropic.requires_api_key());
        assert!(ProviderKind::Gemini.requires_api_key());
        assert!(!ProviderKind::Ollama.requires_api_key());
        assert_eq!(ProviderKind::Ollama.default_api_key_env(), None);
    }

    #[test]
    fn test_settings_defaults() {
        let settings = ProviderSettings::new(ProviderKind::Anthropic);
        assert_eq!(settings.model, "claude-3-5-haiku-latest");
        assert_eq!(settings.endpoint(), "https://api.anthropic.com");
        assert_eq!(settings.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn test_endpoint_override_trims_slash() {
        let settings = ProviderSettings::new(ProviderKind::Ollama)
            .with_endpoint("http://gpu-box:11434/");
        assert_eq!(settings.endpoint(), "http://gpu-box:11434");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let settings = ProviderSettings::new(ProviderKind::OpenAi).with_api_key("sk-secret");
        let debug = format!("{:?}", settings);
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&ProviderKind::OpenAi).unwrap();
        assert_eq!(json, "\"openai\"");
        let kind: ProviderKind = serde_json::from_str("\"gemini\"").unwrap();
        assert_eq!(kind, ProviderKind::Gemini);
    }
}
