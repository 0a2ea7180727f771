//! JSON reporter
//!
//! Outputs the verdicts as a pretty-printed JSON array.
//! Useful for machine consumption, piping to jq, or further processing.

use crate::models::GateVerdict;
use anyhow::Result;

/// Render verdicts as JSON
pub fn render(verdicts: &[GateVerdict]) -> Result<String> {
    Ok(serde_json::to_string_pretty(verdicts)?)
}
