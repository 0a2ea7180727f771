//! Check command - evaluate coverage results against the configured gates

use crate::checks;
use crate::config::load_config;
use crate::models::AggregatedCoverageResults;
use crate::reporters::status::{GitHubStatusClient, GitHubTarget, StatusReporter};
use crate::reporters::{self, OutputFormat};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

/// Options for `covgate check`
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    pub results: Option<PathBuf>,
    pub line_rate: Option<f64>,
    pub base_line_rate: Option<f64>,
    pub format: String,
    pub output: Option<PathBuf>,
    pub publish: bool,
    pub token: Option<String>,
    pub repository: Option<String>,
    pub sha: Option<String>,
    pub api_url: Option<String>,
    pub target_url: Option<String>,
    pub strict: bool,
    pub no_color: bool,
}

fn ensure_rate(name: &str, rate: f64) -> Result<()> {
    anyhow::ensure!(rate.is_finite(), "{} must be a finite number, got {}", name, rate);
    if !(0.0..=100.0).contains(&rate) {
        warn!("{} {} is outside 0-100", name, rate);
    }
    Ok(())
}

/// Read results from `--results`, or build them from `--line-rate`/`--base-line-rate`
fn load_results(opts: &CheckOptions) -> Result<AggregatedCoverageResults> {
    let results = if let Some(ref path) = opts.results {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read results file: {}", path.display()))?;
        serde_json::from_str::<AggregatedCoverageResults>(&content)
            .with_context(|| format!("Invalid coverage results JSON: {}", path.display()))?
    } else {
        let line_rate = opts
            .line_rate
            .context("Either --results or --line-rate is required")?;
        match opts.base_line_rate {
            Some(base) => AggregatedCoverageResults::with_base(line_rate, base),
            None => AggregatedCoverageResults::without_base(line_rate),
        }
    };

    ensure_rate("line rate", results.line_rate)?;
    if let Some(cmp) = results.comparison {
        ensure_rate("base line rate", cmp.base_line_rate)?;
        ensure_rate("delta line rate", cmp.delta_line_rate)?;
    }
    Ok(results)
}

/// Publish verdicts as commit statuses. Setup problems are warnings.
fn publish(verdicts: &[crate::models::GateVerdict], opts: &CheckOptions) {
    let client = GitHubTarget::new(
        opts.api_url.as_deref(),
        opts.repository.as_deref(),
        opts.sha.as_deref(),
    )
    .and_then(|target| GitHubStatusClient::new(target, opts.token.clone().unwrap_or_default()));

    match client {
        Ok(client) => {
            debug!("Publishing statuses to {}", client.target().statuses_url());
            let reporter = StatusReporter::new(client);
            reporter.report_verdicts(verdicts, opts.target_url.as_deref());
        }
        Err(e) => warn!("Skipping status publish: {}", e),
    }
}

/// Run the check command
pub fn run(workspace: &Path, opts: CheckOptions) -> Result<()> {
    let format = OutputFormat::from_str(&opts.format)?;
    let results = load_results(&opts)?;
    let loaded = load_config(workspace);

    let verdicts = checks::evaluate(&results, &loaded.config);

    let color = opts.output.is_none() && !opts.no_color && console::colors_enabled();
    let rendered = reporters::render(&verdicts, format, color)?;
    match opts.output {
        Some(ref path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write output: {}", path.display()))?;
            eprintln!("Report written to {}", path.display());
        }
        None => print!("{}", rendered),
    }

    if opts.publish {
        publish(&verdicts, &opts);
    }

    if opts.strict && !checks::all_passed(&verdicts) {
        eprintln!("Failing due to --strict: a coverage gate did not pass");
        std::process::exit(1);
    }

    Ok(())
}
