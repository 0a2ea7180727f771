//! Markdown reporter for GitHub-flavored Markdown output
//!
//! Suitable for `$GITHUB_STEP_SUMMARY` job summaries and PR comments.

use crate::models::{CheckStatus, GateVerdict};
use anyhow::Result;

fn status_icon(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Success => "✅",
        CheckStatus::Failure => "❌",
    }
}

/// Escape characters that would break a table cell
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

/// Render verdicts as a Markdown table
pub fn render(verdicts: &[GateVerdict]) -> Result<String> {
    let mut md = String::new();
    md.push_str("## Coverage gates\n\n");
    md.push_str("| Gate | Status | Details |\n");
    md.push_str("|------|--------|---------|\n");
    for verdict in verdicts {
        md.push_str(&format!(
            "| `{}` | {} {} | {} |\n",
            verdict.context,
            status_icon(verdict.result.status),
            verdict.result.status,
            escape_cell(&verdict.result.description)
        ));
    }
    Ok(md)
}
