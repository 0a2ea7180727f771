//! covgate - coverage quality gates for CI
//!
//! Checks line coverage against absolute or base-relative targets and
//! reports the verdicts, optionally as commit statuses.

use anyhow::Result;
use clap::Parser;
use covgate::cli;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging (RUST_LOG wins over --log-level); stdout is reserved for reports
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    cli::run(cli)
}
