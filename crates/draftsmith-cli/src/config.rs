//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use draftsmith_content::GeneratorConfig;
use draftsmith_llm::{ProviderKind, ProviderSettings};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name
    #[serde(default = "default_profile")]
    pub active_profile: String,

    /// Available profiles
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Generation limits and defaults
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Where this configuration was loaded from
    #[serde(skip)]
    path: Option<PathBuf>,
}

/// Provider profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Provider to call
    pub provider: ProviderKind,

    /// Model identifier
    pub model: String,

    /// Environment variable holding the API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    /// Base URL override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Completion token budget
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Profile {
    /// Profile using the provider's default model and key variable.
    pub fn for_provider(provider: ProviderKind) -> Self {
        Self {
            provider,
            model: provider.default_model().to_string(),
            api_key_env: provider.default_api_key_env().map(str::to_string),
            endpoint: None,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Environment variable consulted for the API key.
    pub fn key_variable(&self) -> Option<&str> {
        self.api_key_env
            .as_deref()
            .or_else(|| self.provider.default_api_key_env())
    }

    /// Resolve connection settings, reading the API key from the environment.
    pub fn provider_settings(&self) -> ProviderSettings {
        self.provider_settings_with(|name| std::env::var(name).ok())
    }

    /// Resolve connection settings with a custom variable lookup.
    pub fn provider_settings_with<F>(&self, lookup: F) -> ProviderSettings
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = ProviderSettings::new(self.provider).with_model(self.model.clone());

        if let Some(key) = self.key_variable().and_then(|name| lookup(name)) {
            settings = settings.with_api_key(key);
        }
        if let Some(endpoint) = &self.endpoint {
            settings = settings.with_endpoint(endpoint.clone());
        }
        if let Some(temperature) = self.temperature {
            settings.temperature = temperature;
        }
        if let Some(max_tokens) = self.max_tokens {
            settings.max_tokens = max_tokens;
        }
        settings
    }
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".draftsmith").join("config.toml"))
    }

    /// Load configuration from the default location or create default.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load configuration from a specific file, or create default if missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = fs::read_to_string(path)?;
            toml::from_str::<Config>(&contents)?
        } else {
            Self::default()
        };
        config.path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Save configuration to the file it was loaded from.
    pub fn save(&self) -> Result<()> {
        let path = match &self.path {
            Some(path) => path.clone(),
            None => Self::default_path()?,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, contents)?;
        Ok(())
    }

    /// Get the active profile.
    pub fn get_active_profile(&self) -> Result<&Profile> {
        self.profiles
            .get(&self.active_profile)
            .ok_or_else(|| CliError::Config(format!("Profile '{}' not found", self.active_profile)))
    }

    /// Add or update a profile.
    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Copy of this configuration with `name` as the active profile.
    ///
    /// The stored configuration is left alone, so a later `save` keeps the
    /// persisted active profile.
    pub fn with_profile_override(&self, name: Option<String>) -> Result<Config> {
        let mut effective = self.clone();
        if let Some(name) = name {
            effective.switch_profile(name)?;
        }
        Ok(effective)
    }

    /// Switch to a different profile.
    pub fn switch_profile(&mut self, name: String) -> Result<()> {
        if !self.profiles.contains_key(&name) {
            return Err(CliError::Config(format!("Profile '{}' does not exist", name)));
        }
        self.active_profile = name;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert(
            "default".to_string(),
            Profile::for_provider(ProviderKind::OpenAi),
        );

        Self {
            active_profile: "default".to_string(),
            profiles,
            settings: Settings::default(),
            generator: GeneratorConfig::default(),
            path: None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_profile() -> String {
    "default".to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.active_profile, "default");
        assert_eq!(
            config.get_active_profile().unwrap().provider,
            ProviderKind::OpenAi
        );
        assert!(config.settings.color);
        assert_eq!(config.generator, GeneratorConfig::default());
    }

    #[test]
    fn test_profile_management() {
        let mut config = Config::default();

        let profile = Profile {
            model: "llama3.1".to_string(),
            endpoint: Some("http://gpu-box:11434".to_string()),
            ..Profile::for_provider(ProviderKind::Ollama)
        };

        config.set_profile("local".to_string(), profile);
        assert!(config.profiles.contains_key("local"));

        config.switch_profile("local".to_string()).unwrap();
        assert_eq!(config.active_profile, "local");
    }

    #[test]
    fn test_switch_to_nonexistent_profile() {
        let mut config = Config::default();
        let result = config.switch_profile("nonexistent".to_string());
        assert!(result.is_err());
    }

    #[test]
    fn test_profile_override_is_not_persisted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::load_from(&path).unwrap();
        config.set_profile("local".to_string(), Profile::for_provider(ProviderKind::Ollama));

        let effective = config.with_profile_override(Some("local".to_string())).unwrap();
        assert_eq!(effective.get_active_profile().unwrap().provider, ProviderKind::Ollama);
        assert_eq!(config.active_profile, "default");

        config.save().unwrap();
        assert_eq!(Config::load_from(&path).unwrap().active_profile, "default");
    }

    #[test]
    fn test_profile_override_unknown_name() {
        let config = Config::default();
        assert!(config.with_profile_override(Some("missing".to_string())).is_err());
        assert_eq!(
            config.with_profile_override(None).unwrap().active_profile,
            "default"
        );
    }

    #[test]
    fn test_load_missing_file_gives_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.active_profile, "default");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::load_from(&path).unwrap();
        config.set_profile(
            "writer".to_string(),
            Profile {
                temperature: Some(0.3),
                ..Profile::for_provider(ProviderKind::Anthropic)
            },
        );
        config.switch_profile("writer".to_string()).unwrap();
        config.generator = GeneratorConfig::long_form();
        config.settings.format = OutputFormat::Json;
        config.save().unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.active_profile, "writer");
        assert_eq!(
            reloaded.profiles["writer"],
            config.profiles["writer"]
        );
        assert_eq!(reloaded.generator, GeneratorConfig::long_form());
        assert_eq!(reloaded.settings.format, OutputFormat::Json);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "active_profile = \"local\"\n\n[profiles.local]\nprovider = \"ollama\"\nmodel = \"llama3\"\n\n[generator]\ngeneration_timeout_secs = 30\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.get_active_profile().unwrap().provider, ProviderKind::Ollama);
        assert_eq!(config.generator.generation_timeout_secs, 30);
        assert_eq!(config.generator.max_topic_length, 200);
        assert_eq!(config.settings.format, OutputFormat::Table);
    }

    #[test]
    fn test_provider_settings_reads_key_variable() {
        let profile = Profile {
            api_key_env: Some("WRITER_KEY".to_string()),
            max_tokens: Some(2048),
            ..Profile::for_provider(ProviderKind::Anthropic)
        };

        let settings = profile.provider_settings_with(|name| {
            (name == "WRITER_KEY").then(|| "sk-test".to_string())
        });
        assert_eq!(settings.kind, ProviderKind::Anthropic);
        assert_eq!(settings.api_key.as_deref(), Some("sk-test"));
        assert_eq!(settings.max_tokens, 2048);
    }

    #[test]
    fn test_provider_settings_without_key() {
        let profile = Profile::for_provider(ProviderKind::OpenAi);
        let settings = profile.provider_settings_with(|_| None);
        assert!(settings.api_key.is_none());
        assert_eq!(settings.model, ProviderKind::OpenAi.default_model());
    }
}
