//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use draftsmith_domain::{BlogDraft, DraftIssue, ParseStrategy};
use serde_json::{json, Value};
use tabled::{
    builder::Builder,
    settings::{object::Columns, Modify, Style, Width},
};

/// Widest value column in table output.
const TABLE_VALUE_WIDTH: usize = 80;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

/// JSON representation of a draft, using the same keys models are asked for.
pub fn draft_json(draft: &BlogDraft) -> Value {
    json!({
        "title": draft.title,
        "content": draft.content,
        "excerpt": draft.excerpt,
        "seo_description": draft.seo_description,
        "keywords": draft.keywords,
        "estimated_read_time": draft.estimated_read_minutes,
    })
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a draft along with how it was parsed.
    pub fn format_draft(
        &self,
        draft: &BlogDraft,
        strategy: ParseStrategy,
        issues: &[DraftIssue],
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_draft_json(draft, strategy, issues),
            OutputFormat::Table => Ok(self.format_draft_table(draft, strategy, issues)),
            OutputFormat::Quiet => Ok(draft.title.clone()),
        }
    }

    fn format_draft_json(
        &self,
        draft: &BlogDraft,
        strategy: ParseStrategy,
        issues: &[DraftIssue],
    ) -> Result<String> {
        let mut value = draft_json(draft);
        if let Value::Object(map) = &mut value {
            map.insert("strategy".to_string(), json!(strategy.as_str()));
            map.insert(
                "issues".to_string(),
                json!(issues.iter().map(ToString::to_string).collect::<Vec<_>>()),
            );
        }
        Ok(serde_json::to_string_pretty(&value)?)
    }

    fn format_draft_table(
        &self,
        draft: &BlogDraft,
        strategy: ParseStrategy,
        issues: &[DraftIssue],
    ) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        builder.push_record(["Title", draft.title.as_str()]);
        builder.push_record(["Excerpt", draft.excerpt.as_str()]);
        builder.push_record(["SEO description", draft.seo_description.as_str()]);
        builder.push_record(["Keywords".to_string(), draft.keywords.join(", ")]);
        builder.push_record([
            "Read time".to_string(),
            format!("{} min ({} words)", draft.estimated_read_minutes, draft.word_count()),
        ]);
        builder.push_record(["Parsed as", strategy.as_str()]);

        let mut table = builder.build();
        table.with(Style::rounded()).with(
            Modify::new(Columns::last()).with(Width::wrap(TABLE_VALUE_WIDTH)),
        );

        let mut output = table.to_string();
        for issue in issues {
            output.push('\n');
            output.push_str(&self.warning(&issue.to_string()));
        }
        output.push_str("\n\n");
        output.push_str(&draft.content);
        output
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
