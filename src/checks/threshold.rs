//! Threshold checks for project and patch coverage
//!
//! Both checks are pure: same inputs, same verdict, no side effects.

use crate::config::{PatchStatusConfig, ProjectStatusConfig, ProjectTarget};
use crate::models::{AggregatedCoverageResults, StatusCheckResult};

/// Format with two decimals, rounding exact ties away from zero.
///
/// `{:.2}` rounds ties to even. A binary float sits exactly halfway between
/// two hundredths only when it is an odd multiple of 1/8, so those values
/// are rounded up in magnitude before formatting. Negative zero prints as
/// `0.00`.
fn to_fixed_2(value: f64) -> String {
    if value == 0.0 {
        return "0.00".to_string();
    }
    let magnitude = value.abs();
    let eighths = magnitude * 8.0;
    let rounded = if eighths.fract() == 0.0 && eighths % 2.0 == 1.0 {
        (magnitude * 100.0).round() / 100.0
    } else {
        magnitude
    };
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{:.2}", sign, rounded)
}

/// Format a percentage point delta with an explicit sign.
///
/// Negative zero prints as `+0.00`.
fn signed_delta(delta: f64) -> String {
    if delta >= 0.0 {
        format!("+{}", to_fixed_2(delta))
    } else {
        to_fixed_2(delta)
    }
}

/// Check project coverage against the configured target.
///
/// - Absolute target: pass iff `line_rate >= target`.
/// - `auto`: pass iff the drop against base is within `threshold`
///   (inclusive). Without a base report the check is informational and
///   always passes.
pub fn check_project_status(
    results: &AggregatedCoverageResults,
    config: &ProjectStatusConfig,
) -> StatusCheckResult {
    let current = results.line_rate;

    match &config.target {
        ProjectTarget::Absolute(target) => {
            if current >= *target {
                StatusCheckResult::success(format!(
                    "{}% >= target {}%",
                    to_fixed_2(current),
                    target
                ))
            } else {
                StatusCheckResult::failure(format!(
                    "{}% < target {}%",
                    to_fixed_2(current),
                    target
                ))
            }
        }

        ProjectTarget::Auto => {
            let Some(comparison) = results.comparison else {
                return StatusCheckResult::success(format!(
                    "{}% (No base report)",
                    to_fixed_2(current)
                ));
            };

            let delta = comparison.delta_line_rate;
            let allowed_drop = config.threshold.unwrap_or(0.0);
            let is_success = delta >= -allowed_drop;

            let mut description = format!(
                "{}% ({}%) relative to base",
                to_fixed_2(current),
                signed_delta(delta)
            );
            if delta < 0.0 && allowed_drop > 0.0 {
                description.push_str(&format!(" (threshold {}%)", allowed_drop));
            }

            if is_success {
                StatusCheckResult::success(description)
            } else {
                StatusCheckResult::failure(description)
            }
        }

        ProjectTarget::Unrecognized(_) => {
            StatusCheckResult::success("Unknown target configuration")
        }
    }
}

/// Check patch coverage.
///
/// Patch coverage is not computed yet, so this always passes. Wiring in a
/// real gate here changes CI outcomes for every user and needs its own
/// feature flag.
pub fn check_patch_status(
    _results: &AggregatedCoverageResults,
    _config: &PatchStatusConfig,
) -> StatusCheckResult {
    StatusCheckResult::success("Patch coverage check not yet implemented")
}
