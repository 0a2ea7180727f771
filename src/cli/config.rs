//! Config command - show the resolved coverage configuration

use crate::config::{load_config, CONFIG_CANDIDATES};
use anyhow::Result;
use console::style;
use std::path::Path;

/// Print the normalized config for `workspace`
pub fn run(workspace: &Path, format: &str) -> Result<()> {
    let loaded = load_config(workspace);
    let raw = loaded.config.to_raw();

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&raw)?),
        _ => {
            match &loaded.source {
                Some(path) => println!("# Loaded from {}", path.display()),
                None => println!(
                    "# No config file found (looked for {}); using defaults",
                    CONFIG_CANDIDATES.join(", ")
                ),
            }
            print!("{}", serde_yaml::to_string(&raw)?);
        }
    }

    if !loaded.config.ignore.is_empty() {
        let matcher = crate::config::IgnoreMatcher::new(&loaded.config.ignore);
        let skipped = loaded.config.ignore.len() - matcher.patterns().len();
        if skipped > 0 {
            eprintln!(
                "{} {} ignore pattern(s) are not valid globs and will be skipped",
                style("!").yellow(),
                skipped
            );
        }
    }

    Ok(())
}
