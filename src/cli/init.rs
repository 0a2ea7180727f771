//! Init command - write a starter coverage config

use crate::config::find_config_path;
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

const STARTER_CONFIG: &str = r#"# Coverage gates, read by covgate
coverage:
  status:
    project:
      # "auto" compares against the base branch; a number is an absolute target
      target: auto
      # Allowed drop in percentage points when target is auto
      threshold: 1
    patch:
      target: 80
  # Glob patterns excluded from coverage
  ignore:
    - "tests/**"
"#;

/// Run the init command
pub fn run(workspace: &Path, force: bool) -> Result<()> {
    if !workspace.is_dir() {
        anyhow::bail!("Workspace is not a directory: {}", workspace.display());
    }

    if let Some(existing) = find_config_path(workspace) {
        if !force {
            println!(
                "{} Config already exists at {} (use --force to overwrite .github/coverage.yml)",
                style("✓").green(),
                style(existing.display()).cyan()
            );
            return Ok(());
        }
    }

    let config_path = workspace.join(".github").join("coverage.yml");
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(&config_path, STARTER_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!(
        "{} Created {}",
        style("✓").green(),
        style(config_path.display()).cyan()
    );
    println!("\nNext steps:");
    println!("  {} Check your settings", style("covgate config").cyan());
    println!(
        "  {} Evaluate a run",
        style("covgate check --line-rate 85 --base-line-rate 84").cyan()
    );

    Ok(())
}
