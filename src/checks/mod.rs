//! Coverage gate checks
//!
//! Runs the project and patch threshold checks and tags each verdict with
//! the commit status context it is reported under.

mod threshold;

pub use threshold::{check_patch_status, check_project_status};

use crate::config::NormalizedConfig;
use crate::models::{AggregatedCoverageResults, GateVerdict};

/// Status context for the whole-project gate
pub const PROJECT_CONTEXT: &str = "coverage/project";
/// Status context for the patch gate
pub const PATCH_CONTEXT: &str = "coverage/patch";

/// Evaluate every gate, project first
pub fn evaluate(results: &AggregatedCoverageResults, config: &NormalizedConfig) -> Vec<GateVerdict> {
    vec![
        GateVerdict {
            context: PROJECT_CONTEXT.to_string(),
            result: check_project_status(results, &config.status.project),
        },
        GateVerdict {
            context: PATCH_CONTEXT.to_string(),
            result: check_patch_status(results, &config.status.patch),
        },
    ]
}

/// True if every verdict passed
pub fn all_passed(verdicts: &[GateVerdict]) -> bool {
    verdicts.iter().all(|v| v.result.status.is_success())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProjectTarget;
    use crate::models::CheckStatus;

    #[test]
    fn test_evaluate_defaults_without_base() {
        let verdicts = evaluate(
            &AggregatedCoverageResults::without_base(55.0),
            &NormalizedConfig::default(),
        );
        assert_eq!(verdicts.len(), 2);
        assert_eq!(verdicts[0].context, PROJECT_CONTEXT);
        assert_eq!(verdicts[0].result.description, "55.00% (No base report)");
        assert_eq!(verdicts[1].context, PATCH_CONTEXT);
        assert!(all_passed(&verdicts));
    }

    #[test]
    fn test_evaluate_absolute_failure() {
        let mut config = NormalizedConfig::default();
        config.status.project.target = ProjectTarget::Absolute(90.0);
        let verdicts = evaluate(&AggregatedCoverageResults::without_base(80.0), &config);
        assert_eq!(verdicts[0].result.status, CheckStatus::Failure);
        assert_eq!(verdicts[1].result.status, CheckStatus::Success);
        assert!(!all_passed(&verdicts));
    }
}
