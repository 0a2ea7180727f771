//! CLI command definitions and handlers

mod check;
mod config;
mod init;

pub use check::CheckOptions;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// covgate - coverage quality gates for CI
#[derive(Parser, Debug)]
#[command(name = "covgate")]
#[command(
    version,
    about = "Coverage quality gates: check line coverage against absolute or base-relative targets",
    long_about = "covgate reads a coverage gate config (.github/coverage.yml, codecov.yml, ...) \
from the workspace, evaluates aggregated coverage results against it, and reports \
pass/fail verdicts, optionally as GitHub commit statuses.\n\n\
Gates are advisory by default: the exit code is 0 unless --strict is given.",
    after_help = "\
Examples:
  covgate check --line-rate 82.5 --base-line-rate 81      Compare against base branch
  covgate check --results coverage-summary.json            Read aggregated results from JSON
  covgate check --results summary.json --publish           Also post commit statuses
  covgate config                                           Show the resolved configuration
  covgate init                                             Write a starter .github/coverage.yml"
)]
pub struct Cli {
    /// Workspace root to look for the config file in (default: current directory)
    #[arg(long, global = true, env = "GITHUB_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate coverage results against the configured gates
    #[command(after_help = "\
Results JSON format:
  {\"lineRate\": 82.5, \"comparison\": {\"baseLineRate\": 81.0, \"deltaLineRate\": 1.5}}

`comparison` is optional; without it an `auto` project target always passes.")]
    Check {
        /// JSON file with aggregated coverage results
        #[arg(long, required_unless_present = "line_rate", conflicts_with = "line_rate")]
        results: Option<PathBuf>,

        /// Current line coverage percentage (alternative to --results)
        #[arg(long, allow_negative_numbers = true)]
        line_rate: Option<f64>,

        /// Base branch line coverage percentage
        #[arg(long, requires = "line_rate", allow_negative_numbers = true)]
        base_line_rate: Option<f64>,

        /// Output format: text, json, markdown (or md)
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json", "markdown", "md"])]
        format: String,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Publish verdicts as commit statuses
        #[arg(long)]
        publish: bool,

        /// API token for publishing
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Repository as owner/name
        #[arg(long, env = "GITHUB_REPOSITORY")]
        repository: Option<String>,

        /// Commit SHA to attach statuses to
        #[arg(long, env = "GITHUB_SHA")]
        sha: Option<String>,

        /// REST API base URL
        #[arg(long, env = "GITHUB_API_URL")]
        api_url: Option<String>,

        /// Link shown on the commit status (default: the current Actions run)
        #[arg(long)]
        target_url: Option<String>,

        #[arg(long, env = "GITHUB_SERVER_URL", hide = true)]
        server_url: Option<String>,

        #[arg(long, env = "GITHUB_RUN_ID", hide = true)]
        run_id: Option<String>,

        /// Exit with code 1 if any gate fails
        #[arg(long)]
        strict: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Show the resolved configuration and where it was loaded from
    Config {
        /// Output format: yaml, json
        #[arg(long, short = 'f', default_value = "yaml", value_parser = ["yaml", "json"])]
        format: String,
    },

    /// Write a starter .github/coverage.yml
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let workspace = crate::config::workspace_root(cli.workspace.as_deref());

    match cli.command {
        Commands::Check {
            results,
            line_rate,
            base_line_rate,
            format,
            output,
            publish,
            token,
            repository,
            sha,
            api_url,
            target_url,
            server_url,
            run_id,
            strict,
            no_color,
        } => {
            // Default the status link to the Actions run when running in CI
            let effective_target_url = target_url.or_else(|| match (&server_url, &repository, &run_id) {
                (Some(server), Some(repo), Some(run)) => Some(
                    crate::reporters::status::actions_run_url(server, repo, run),
                ),
                _ => None,
            });

            check::run(
                &workspace,
                CheckOptions {
                    results,
                    line_rate,
                    base_line_rate,
                    format,
                    output,
                    publish,
                    token,
                    repository,
                    sha,
                    api_url,
                    target_url: effective_target_url,
                    strict,
                    no_color,
                },
            )
        }

        Commands::Config { format } => config::run(&workspace, &format),

        Commands::Init { force } => init::run(&workspace, force),
    }
}
