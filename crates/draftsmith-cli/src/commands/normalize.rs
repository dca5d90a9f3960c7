//! Normalize command implementation.

use crate::cli::NormalizeArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use draftsmith_content::ContentNormalizer;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tracing::debug;

/// Execute the normalize command.
pub async fn execute_normalize(args: NormalizeArgs, formatter: &Formatter) -> Result<()> {
    let raw = read_input(args.input.as_deref(), args.stdin, io::stdin())?;
    println!("{}", render(&raw, &args.topic, formatter)?);
    Ok(())
}

/// Normalize raw text and format the resulting draft.
fn render(raw: &str, topic: &str, formatter: &Formatter) -> Result<String> {
    debug!("Normalizing {} chars of raw text", raw.len());
    let (draft, strategy) = ContentNormalizer::new().normalize_with_strategy(raw, topic);
    let issues = draft.validate();
    formatter.format_draft(&draft, strategy, &issues)
}

/// Read raw text from exactly one of a file or the given reader.
fn read_input<R: Read>(input: Option<&Path>, use_stdin: bool, mut reader: R) -> Result<String> {
    match (input, use_stdin) {
        (Some(path), false) => Ok(fs::read_to_string(path)?),
        (None, true) => {
            let mut raw = String::new();
            reader.read_to_string(&mut raw)?;
            Ok(raw)
        }
        (Some(_), true) => Err(CliError::InvalidInput(
            "Use either --input or --stdin, not both".to_string(),
        )),
        (None, false) => Err(CliError::InvalidInput(
            "Must specify --input or --stdin".to_string(),
        )),
    }
}
