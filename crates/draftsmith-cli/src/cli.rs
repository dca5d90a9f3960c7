//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use draftsmith_llm::ProviderKind;
use std::path::PathBuf;

/// Draftsmith CLI - Draft and normalize blog posts with language models.
#[derive(Debug, Parser)]
#[command(name = "draftsmith")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "DRAFTSMITH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (title only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Normalize raw model output into a blog draft
    Normalize(NormalizeArgs),

    /// Generate a blog draft with the active provider
    Generate(GenerateArgs),

    /// Manage provider profiles
    Profile(ProfileArgs),
}

/// Arguments for the normalize command.
#[derive(Debug, Parser)]
pub struct NormalizeArgs {
    /// Fallback title and keyword source
    #[arg(short, long)]
    pub topic: String,

    /// File containing raw model output
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Read raw model output from stdin
    #[arg(long)]
    pub stdin: bool,
}

/// Arguments for the generate command.
#[derive(Debug, Parser)]
pub struct GenerateArgs {
    /// Post topic
    #[arg(short, long)]
    pub topic: String,

    /// Writing tone (e.g. "friendly", "technical")
    #[arg(long)]
    pub tone: Option<String>,

    /// Intended readers
    #[arg(long)]
    pub audience: Option<String>,

    /// Approximate length in words
    #[arg(short, long)]
    pub words: Option<usize>,

    /// Keyword to work into the post (repeatable)
    #[arg(short, long = "keyword")]
    pub keywords: Vec<String>,

    /// Write the draft as JSON to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Use {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,
        /// Provider (openai, anthropic, gemini, ollama)
        #[arg(long, value_parser = parse_provider)]
        provider: ProviderKind,
        /// Model identifier (provider default if omitted)
        #[arg(short, long)]
        model: Option<String>,
        /// Environment variable holding the API key
        #[arg(long)]
        api_key_env: Option<String>,
        /// Base URL override
        #[arg(short, long)]
        endpoint: Option<String>,
        /// Sampling temperature
        #[arg(long)]
        temperature: Option<f32>,
        /// Completion token budget
        #[arg(long)]
        max_tokens: Option<u32>,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

fn parse_provider(value: &str) -> std::result::Result<ProviderKind, String> {
    value.parse()
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
