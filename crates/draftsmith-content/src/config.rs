//! Configuration for the Generator

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Maximum topic length (characters)
    pub max_topic_length: usize,

    /// Maximum time for a single generation call (seconds)
    pub generation_timeout_secs: u64,

    /// Target post length when a request does not set one (words)
    pub default_target_words: usize,

    /// Treat a blank model reply as an error instead of an empty draft
    pub reject_empty_response: bool,
}

/// Bounds for `default_target_words`
const MIN_TARGET_WORDS: usize = 100;
const MAX_TARGET_WORDS: usize = 10_000;

impl GeneratorConfig {
    /// Get the generation timeout as a Duration
    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_topic_length == 0 {
            return Err("max_topic_length must be greater than 0".to_string());
        }
        if self.generation_timeout_secs == 0 {
            return Err("generation_timeout_secs must be greater than 0".to_string());
        }
        if !(MIN_TARGET_WORDS..=MAX_TARGET_WORDS).contains(&self.default_target_words) {
            return Err(format!(
                "default_target_words must be between {} and {}",
                MIN_TARGET_WORDS, MAX_TARGET_WORDS
            ));
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            max_topic_length: 200,
            generation_timeout_secs: 120,
            default_target_words: 1_000,
            reject_empty_response: true,
        }
    }
}

impl GeneratorConfig {
    /// Quick preset: short posts, short timeout
    pub fn quick() -> Self {
        Self {
            max_topic_length: 200,
            generation_timeout_secs: 60,
            default_target_words: 600,
            reject_empty_response: true,
        }
    }

    /// Long-form preset: long posts, generous timeout
    pub fn long_form() -> Self {
        Self {
            max_topic_length: 300,
            generation_timeout_secs: 300,
            default_target_words: 2_000,
            reject_empty_response: true,
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
