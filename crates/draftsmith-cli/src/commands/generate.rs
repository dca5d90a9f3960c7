//! Generate command implementation.

use crate::cli::GenerateArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::{draft_json, Formatter};
use draftsmith_content::{GenerationRequest, GenerationResult, Generator};
use draftsmith_domain::traits::LlmProvider;
use draftsmith_llm::ChatProvider;
use std::fs;
use tracing::info;

/// Execute the generate command.
pub async fn execute_generate(
    args: GenerateArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let profile = config.get_active_profile()?;
    let provider = ChatProvider::new(profile.provider_settings())?;

    let settings = provider.settings();
    info!(
        "Using profile '{}' ({} / {} at {})",
        config.active_profile,
        settings.kind,
        settings.model,
        settings.endpoint()
    );

    let model_name = provider.model().to_string();
    let generator = Generator::new(provider, config.generator.clone()).with_model_name(model_name);

    let result = run(&generator, args, formatter).await?;
    eprintln!(
        "{}",
        formatter.info(&format!(
            "{} in {} ms",
            result.metadata.model_name, result.metadata.processing_time_ms
        ))
    );
    Ok(())
}

/// Generate a draft, print it, and optionally write it to a file.
async fn run<L>(
    generator: &Generator<L>,
    args: GenerateArgs,
    formatter: &Formatter,
) -> Result<GenerationResult>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    let request = build_request(&args);
    let result = generator.generate(request).await?;

    println!(
        "{}",
        formatter.format_draft(&result.draft, result.metadata.strategy, &result.metadata.issues)?
    );

    if let Some(path) = &args.output {
        let contents = serde_json::to_string_pretty(&draft_json(&result.draft))?;
        fs::write(path, contents)?;
        eprintln!(
            "{}",
            formatter.success(&format!("Draft written to {}", path.display()))
        );
    }

    Ok(result)
}

fn build_request(args: &GenerateArgs) -> GenerationRequest {
    let mut request = GenerationRequest::new(args.topic.clone())
        .with_focus_keywords(args.keywords.clone());
    if let Some(tone) = &args.tone {
        request = request.with_tone(tone.clone());
    }
    if let Some(audience) = &args.audience {
        request = request.with_audience(audience.clone());
    }
    if let Some(words) = args.words {
        request = request.with_target_words(words);
    }
    request
}
