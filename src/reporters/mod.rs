//! Output reporters for gate verdicts
//!
//! Supports multiple output formats:
//! - `text` - Terminal output, one line per gate
//! - `json` - Machine-readable JSON
//! - `markdown` - GitHub-flavored Markdown table (job summaries, PR comments)
//!
//! Commit status publishing lives in [`status`].

mod json;
mod markdown;
pub mod status;
mod text;

use crate::models::GateVerdict;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: text, json, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Render verdicts in the specified format. `color` only affects text output.
pub fn render(verdicts: &[GateVerdict], format: OutputFormat, color: bool) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(verdicts, color),
        OutputFormat::Json => json::render(verdicts),
        OutputFormat::Markdown => markdown::render(verdicts),
    }
}
