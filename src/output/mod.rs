//! Report rendering for the lintdelta CLI.
//!
//! Two formats: plain text for terminals, JSON for tooling. Both render the
//! merged result set; exit-code selection stays in `main` via the error
//! kind returned by the command layer.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::report::{Message, MessageSet};
use crate::runner::FileReport;

/// Output format for the final report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Render the per-file reports and their merged result set.
pub fn render(reports: &[FileReport], merged: &MessageSet, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => render_text(reports, merged),
        OutputFormat::Json => render_json(reports, merged),
    }
}

fn render_text(reports: &[FileReport], merged: &MessageSet) -> String {
    let mut out = String::new();

    for message in &merged.messages {
        out.push_str(&format_message(message));
        out.push('\n');
    }

    let pre_existing: usize = reports.iter().map(|r| r.pre_existing).sum();
    if merged.is_empty() {
        out.push_str(&format!(
            "No new lint issues ({} pre-existing suppressed).\n",
            pre_existing
        ));
    } else {
        out.push_str(&format!(
            "{} new lint issue(s) ({} error(s), {} warning(s)); {} pre-existing suppressed.\n",
            merged.len(),
            merged.error_count,
            merged.warning_count,
            pre_existing
        ));
    }

    out
}

/// One message as `file:line[:column]: severity [code] text`.
fn format_message(message: &Message) -> String {
    if message.column > 0 {
        format!(
            "{}:{}:{}: {} [{}] {}",
            message.file, message.line, message.column, message.severity, message.code, message.text
        )
    } else {
        format!(
            "{}:{}: {} [{}] {}",
            message.file, message.line, message.severity, message.code, message.text
        )
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    files: Vec<JsonFileReport<'a>>,
    total_new: usize,
    total_errors: usize,
    total_warnings: usize,
    total_pre_existing: usize,
}

#[derive(Serialize)]
struct JsonFileReport<'a> {
    file: &'a str,
    new_issues: &'a [Message],
    errors: usize,
    warnings: usize,
    pre_existing: usize,
}

fn render_json(reports: &[FileReport], merged: &MessageSet) -> String {
    let report = JsonReport {
        generated_at: Utc::now().to_rfc3339(),
        files: reports
            .iter()
            .map(|r| JsonFileReport {
                file: &r.file,
                new_issues: &r.new_issues.messages,
                errors: r.new_issues.error_count,
                warnings: r.new_issues.warning_count,
                pre_existing: r.pre_existing,
            })
            .collect(),
        total_new: merged.len(),
        total_errors: merged.error_count,
        total_warnings: merged.warning_count,
        total_pre_existing: reports.iter().map(|r| r.pre_existing).sum(),
    };

    // Serialization of these plain structs cannot fail.
    serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
}
