//! Integration tests for the covgate library
//!
//! Each test writes a config into its own temp workspace, loads it the way
//! the CLI does, and runs the gates end to end.

use covgate::checks::{check_patch_status, check_project_status, evaluate};
use covgate::config::{load_config, normalize, ProjectTarget, RawConfig};
use covgate::models::{AggregatedCoverageResults, CheckStatus, CoverageComparison};
use std::path::Path;
use tempfile::TempDir;

fn workspace_with(rel: &str, content: &str) -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
    dir
}

fn results(line_rate: f64, base: f64, delta: f64) -> AggregatedCoverageResults {
    AggregatedCoverageResults {
        line_rate,
        comparison: Some(CoverageComparison {
            base_line_rate: base,
            delta_line_rate: delta,
        }),
    }
}

fn project_config(ws: &Path) -> covgate::config::ProjectStatusConfig {
    load_config(ws).config.status.project
}

#[test]
fn test_empty_config_file_defaults() {
    let ws = workspace_with(".github/coverage.yml", "");
    let config = load_config(ws.path()).config;
    assert_eq!(config.status.project.target, ProjectTarget::Auto);
    assert_eq!(config.status.project.threshold, None);
    assert_eq!(config.status.patch.target, 80.0);
    assert!(config.ignore.is_empty());
}

#[test]
fn test_yaml_fields_reflected() {
    let ws = workspace_with(
        ".github/codecov.yml",
        "coverage:\n  status:\n    project:\n      target: 90\n      threshold: 1\n    patch:\n      target: 100\n",
    );
    let config = load_config(ws.path()).config;
    assert_eq!(config.status.project.target, ProjectTarget::Absolute(90.0));
    assert_eq!(config.status.project.threshold, Some(1.0));
    assert_eq!(config.status.patch.target, 100.0);
    assert_eq!(config.status.patch.threshold, None);
}

#[test]
fn test_auto_improvement_passes() {
    let ws = workspace_with(
        "coverage.yml",
        "coverage:\n  status:\n    project:\n      target: auto\n      threshold: 0\n",
    );
    let result = check_project_status(&results(80.0, 75.0, 5.0), &project_config(ws.path()));
    assert_eq!(result.status, CheckStatus::Success);
    assert!(result.description.contains("(+5.00%) relative to base"));
}

#[test]
fn test_auto_drop_within_threshold_passes() {
    let ws = workspace_with(
        "codecov.yml",
        "coverage:\n  status:\n    project:\n      target: auto\n      threshold: 5\n",
    );
    let result = check_project_status(&results(79.0, 80.0, -1.0), &project_config(ws.path()));
    assert_eq!(result.status, CheckStatus::Success);
    assert_eq!(
        result.description,
        "79.00% (-1.00%) relative to base (threshold 5%)"
    );
}

#[test]
fn test_auto_drop_beyond_threshold_fails() {
    let ws = workspace_with(
        ".github/coverage.yaml",
        "coverage:\n  status:\n    project:\n      target: auto\n      threshold: 5\n",
    );
    let result = check_project_status(&results(70.0, 80.0, -10.0), &project_config(ws.path()));
    assert_eq!(result.status, CheckStatus::Failure);
}

#[test]
fn test_absolute_target_failure() {
    let ws = workspace_with(
        ".github/coverage.yml",
        "coverage:\n  status:\n    project:\n      target: 90\n      threshold: null\n",
    );
    let result = check_project_status(
        &AggregatedCoverageResults::without_base(80.0),
        &project_config(ws.path()),
    );
    assert_eq!(result.status, CheckStatus::Failure);
    assert_eq!(result.description, "80.00% < target 90%");
}

#[test]
fn test_boundary_drop_equal_to_threshold_passes() {
    let raw: RawConfig = serde_yaml::from_str(
        "coverage:\n  status:\n    project:\n      target: auto\n      threshold: 5\n",
    )
    .unwrap();
    let config = normalize(&raw);
    let result = check_project_status(&results(75.0, 80.0, -5.0), &config.status.project);
    assert_eq!(result.status, CheckStatus::Success);
}

#[test]
fn test_patch_always_passes() {
    let ws = workspace_with(
        ".github/coverage.yml",
        "coverage:\n  status:\n    patch:\n      target: 100\n      threshold: 0\n",
    );
    let config = load_config(ws.path()).config;
    let result = check_patch_status(&AggregatedCoverageResults::without_base(1.0), &config.status.patch);
    assert_eq!(result.status, CheckStatus::Success);
    assert_eq!(result.description, "Patch coverage check not yet implemented");
}

#[test]
fn test_evaluate_full_pipeline() {
    let ws = workspace_with(
        ".github/coverage.yml",
        "coverage:\n  status:\n    project:\n      target: 75\n  ignore:\n    - \"tests/**\"\n",
    );
    let loaded = load_config(ws.path());
    let verdicts = evaluate(&AggregatedCoverageResults::with_base(76.0, 74.0), &loaded.config);
    assert_eq!(verdicts[0].result.description, "76.00% >= target 75%");
    assert!(verdicts.iter().all(|v| v.result.status.is_success()));

    let matcher = covgate::config::IgnoreMatcher::new(&loaded.config.ignore);
    assert!(matcher.is_ignored("tests/unit/a.rs"));
    assert!(!matcher.is_ignored("src/a.rs"));
}
