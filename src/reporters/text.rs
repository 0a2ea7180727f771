//! Text (terminal) reporter

use crate::models::{CheckStatus, GateVerdict};
use anyhow::Result;

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

fn status_color(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Success => GREEN,
        CheckStatus::Failure => RED,
    }
}

/// Render verdicts as `<context>: <status> - <description>` lines
pub fn render(verdicts: &[GateVerdict], color: bool) -> Result<String> {
    let mut out = String::new();
    for verdict in verdicts {
        let status = verdict.result.status;
        if color {
            out.push_str(&format!(
                "{BOLD}{}{RESET}: {}{}{RESET} - {}\n",
                verdict.context,
                status_color(status),
                status,
                verdict.result.description
            ));
        } else {
            out.push_str(&format!(
                "{}: {} - {}\n",
                verdict.context, status, verdict.result.description
            ));
        }
    }
    Ok(out)
}
