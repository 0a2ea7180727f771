//! Core data models for covgate
//!
//! These models carry coverage measurements into the gate checks and
//! verdicts out of them.

use serde::{Deserialize, Serialize};

/// Aggregated coverage numbers for one run, produced upstream.
///
/// `comparison` is only present when a base-branch report exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedCoverageResults {
    /// Overall line coverage percentage (0-100)
    pub line_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison: Option<CoverageComparison>,
}

/// Base-branch comparison. `delta_line_rate` is taken as given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageComparison {
    pub base_line_rate: f64,
    pub delta_line_rate: f64,
}

impl AggregatedCoverageResults {
    /// Results with no base report to compare against
    pub fn without_base(line_rate: f64) -> Self {
        Self {
            line_rate,
            comparison: None,
        }
    }

    /// Results compared against a base-branch line rate
    pub fn with_base(line_rate: f64, base_line_rate: f64) -> Self {
        Self {
            line_rate,
            comparison: Some(CoverageComparison {
                base_line_rate,
                delta_line_rate: line_rate - base_line_rate,
            }),
        }
    }
}

/// Terminal outcome of a gate check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Success,
    Failure,
}

impl CheckStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, CheckStatus::Success)
    }
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckStatus::Success => write!(f, "success"),
            CheckStatus::Failure => write!(f, "failure"),
        }
    }
}

/// Verdict of a single gate check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCheckResult {
    pub status: CheckStatus,
    pub description: String,
}

impl StatusCheckResult {
    pub fn success(description: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Success,
            description: description.into(),
        }
    }

    pub fn failure(description: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Failure,
            description: description.into(),
        }
    }
}

/// A verdict paired with the status context it is reported under
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateVerdict {
    pub context: String,
    #[serde(flatten)]
    pub result: StatusCheckResult,
}
