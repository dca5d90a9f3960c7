//! Profile command implementation.

use crate::cli::{ProfileAction, ProfileArgs};
use crate::config::{Config, Profile};
use crate::error::Result;
use crate::output::Formatter;
use draftsmith_llm::ProviderKind;

/// Execute the profile command.
pub async fn execute_profile(
    args: ProfileArgs,
    config: &mut Config,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ProfileAction::List => list_profiles(config, formatter),
        ProfileAction::Show => show_active_profile(config, formatter),
        ProfileAction::Use { name } => switch_profile(config, name, formatter),
        ProfileAction::Set {
            name,
            provider,
            model,
            api_key_env,
            endpoint,
            temperature,
            max_tokens,
        } => {
            let profile = build_profile(provider, model, api_key_env, endpoint, temperature, max_tokens);
            set_profile(config, name, profile, formatter)
        }
        ProfileAction::Delete { name } => delete_profile(config, name, formatter),
    }
}

fn build_profile(
    provider: ProviderKind,
    model: Option<String>,
    api_key_env: Option<String>,
    endpoint: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
) -> Profile {
    let mut profile = Profile::for_provider(provider);
    if let Some(model) = model {
        profile.model = model;
    }
    if api_key_env.is_some() {
        profile.api_key_env = api_key_env;
    }
    profile.endpoint = endpoint;
    profile.temperature = temperature;
    profile.max_tokens = max_tokens;
    profile
}

fn describe(profile: &Profile, indent: &str) {
    println!("{}Provider: {}", indent, profile.provider);
    println!("{}Model: {}", indent, profile.model);
    if let Some(var) = profile.key_variable() {
        let state = if std::env::var(var).is_ok() { "set" } else { "not set" };
        println!("{}API key: ${} ({})", indent, var, state);
    }
    if let Some(endpoint) = &profile.endpoint {
        println!("{}Endpoint: {}", indent, endpoint);
    }
    if let Some(temperature) = profile.temperature {
        println!("{}Temperature: {}", indent, temperature);
    }
    if let Some(max_tokens) = profile.max_tokens {
        println!("{}Max tokens: {}", indent, max_tokens);
    }
}

/// List all profiles.
fn list_profiles(config: &Config, formatter: &Formatter) -> Result<()> {
    if config.profiles.is_empty() {
        println!("{}", formatter.info("No profiles configured"));
        return Ok(());
    }

    println!("Available profiles:");
    for (name, profile) in &config.profiles {
        if name == &config.active_profile {
            println!("* {}", formatter.success(name));
        } else {
            println!("  {}", name);
        }
        describe(profile, "    ");
    }

    Ok(())
}

/// Show the active profile.
fn show_active_profile(config: &Config, formatter: &Formatter) -> Result<()> {
    let profile = config.get_active_profile()?;

    println!("Active profile: {}", formatter.success(&config.active_profile));
    describe(profile, "  ");

    Ok(())
}

/// Switch to a different profile.
fn switch_profile(config: &mut Config, name: String, formatter: &Formatter) -> Result<()> {
    config.switch_profile(name.clone())?;
    config.save()?;
    println!(
        "{}",
        formatter.success(&format!("Switched to profile '{}'", name))
    );
    Ok(())
}

/// Create or update a profile.
fn set_profile(
    config: &mut Config,
    name: String,
    profile: Profile,
    formatter: &Formatter,
) -> Result<()> {
    let action = if config.profiles.contains_key(&name) {
        "Updated"
    } else {
        "Created"
    };

    config.set_profile(name.clone(), profile);
    config.save()?;

    println!(
        "{}",
        formatter.success(&format!("{} profile '{}'", action, name))
    );

    Ok(())
}

/// Delete a profile.
fn delete_profile(config: &mut Config, name: String, formatter: &Formatter) -> Result<()> {
    if name == config.active_profile {
        return Err(crate::error::CliError::NotPermitted(
            "Cannot delete the active profile".to_string(),
        ));
    }

    if config.profiles.remove(&name).is_some() {
        config.save()?;
        println!(
            "{}",
            formatter.success(&format!("Deleted profile '{}'", name))
        );
    } else {
        println!(
            "{}",
            formatter.warning(&format!("Profile '{}' does not exist", name))
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use tempfile::TempDir;

    fn temp_config(dir: &TempDir) -> Config {
        Config::load_from(&dir.path().join("config.toml")).unwrap()
    }

    #[test]
    fn test_build_profile_defaults() {
        let profile = build_profile(ProviderKind::Anthropic, None, None, None, None, None);
        assert_eq!(profile.model, ProviderKind::Anthropic.default_model());
        assert_eq!(profile.api_key_env.as_deref(), Some("ANTHROPIC_API_KEY"));
    }

    #[test]
    fn test_build_profile_overrides() {
        let profile = build_profile(
            ProviderKind::Ollama,
            Some("mistral".to_string()),
            None,
            Some("http://gpu-box:11434".to_string()),
            Some(0.2),
            Some(1024),
        );
        assert_eq!(profile.model, "mistral");
        assert_eq!(profile.api_key_env, None);
        assert_eq!(profile.endpoint.as_deref(), Some("http://gpu-box:11434"));
        assert_eq!(profile.temperature, Some(0.2));
        assert_eq!(profile.max_tokens, Some(1024));
    }

    #[test]
    fn test_set_and_switch_profile() {
        let dir = TempDir::new().unwrap();
        let mut config = temp_config(&dir);
        let formatter = Formatter::new(OutputFormat::Table, false);

        set_profile(
            &mut config,
            "local".to_string(),
            Profile::for_provider(ProviderKind::Ollama),
            &formatter,
        )
        .unwrap();
        assert!(config.profiles.contains_key("local"));

        switch_profile(&mut config, "local".to_string(), &formatter).unwrap();
        assert_eq!(config.active_profile, "local");

        let reloaded = temp_config(&dir);
        assert_eq!(reloaded.active_profile, "local");
    }

    #[test]
    fn test_delete_active_profile() {
        let dir = TempDir::new().unwrap();
        let mut config = temp_config(&dir);
        let formatter = Formatter::new(OutputFormat::Table, false);

        let result = delete_profile(&mut config, "default".to_string(), &formatter);
        assert!(result.is_err());
    }

    #[test]
    fn test_delete_other_profile() {
        let dir = TempDir::new().unwrap();
        let mut config = temp_config(&dir);
        let formatter = Formatter::new(OutputFormat::Table, false);
        config.set_profile("spare".to_string(), Profile::for_provider(ProviderKind::Gemini));

        delete_profile(&mut config, "spare".to_string(), &formatter).unwrap();
        assert!(!config.profiles.contains_key("spare"));
    }
}
