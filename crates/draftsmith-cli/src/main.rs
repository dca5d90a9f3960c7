//! Draftsmith CLI - Draft and normalize blog posts from the command line.

use anyhow::Context;
use clap::Parser;
use draftsmith_cli::commands;
use draftsmith_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Load or create config
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;

    // Profile override applies to this run only
    let effective = config.with_profile_override(cli.profile)?;

    config
        .generator
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid [generator] settings: {}", e))?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Normalize(args) => {
            commands::execute_normalize(args, &formatter).await?;
        }
        Command::Generate(args) => {
            commands::execute_generate(args, &effective, &formatter)
                .await
                .context("Draft generation failed")?;
        }
        Command::Profile(args) => {
            commands::execute_profile(args, &mut config, &formatter).await?;
        }
    }

    Ok(())
}
