//! Config file discovery and loading
//!
//! Looks for the coverage config under the workspace root and parses it.
//! Nothing here is fatal: a missing file means defaults, an unreadable or
//! malformed one is logged and treated as empty.

use super::coverage_config::{normalize, NormalizedConfig, RawConfig};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Candidate config locations, relative to the workspace root. First match wins.
pub const CONFIG_CANDIDATES: [&str; 6] = [
    ".github/coverage.yml",
    ".github/coverage.yaml",
    ".github/codecov.yml",
    ".github/codecov.yaml",
    "coverage.yml",
    "codecov.yml",
];

/// Environment variable naming the workspace root in CI
pub const WORKSPACE_ENV: &str = "GITHUB_WORKSPACE";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Resolve the workspace root: explicit override, then `GITHUB_WORKSPACE`,
/// then the current directory.
pub fn workspace_root(override_path: Option<&Path>) -> PathBuf {
    if let Some(path) = override_path {
        return path.to_path_buf();
    }
    if let Some(ws) = std::env::var_os(WORKSPACE_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(ws);
    }
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Find the first existing config file under `workspace`
pub fn find_config_path(workspace: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|candidate| workspace.join(candidate))
        .find(|path| path.is_file())
}

/// True if the document holds nothing but whitespace and comments
fn is_blank_yaml(content: &str) -> bool {
    content
        .lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with('#') || line == "---")
}

/// Parse config file contents. An empty or `null` document is an empty config.
pub fn parse_raw_config(content: &str, origin: &str) -> Result<RawConfig, ConfigError> {
    if is_blank_yaml(content) {
        return Ok(RawConfig::default());
    }
    let value: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|source| ConfigError::Yaml {
            path: origin.to_string(),
            source,
        })?;
    if value.is_null() {
        return Ok(RawConfig::default());
    }
    serde_yaml::from_value(value).map_err(|source| ConfigError::Yaml {
        path: origin.to_string(),
        source,
    })
}

/// Read and parse a config file
pub fn load_raw_config(path: &Path) -> Result<RawConfig, ConfigError> {
    let origin = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: origin.clone(),
        source,
    })?;
    parse_raw_config(&content, &origin)
}

/// Result of config loading: the normalized config and where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub config: NormalizedConfig,
    /// The file that was found, if any (even if it failed to parse)
    pub source: Option<PathBuf>,
}

/// Locate, parse, and normalize the coverage config for `workspace`.
///
/// Never fails; problems are logged and defaults used.
pub fn load_config(workspace: &Path) -> LoadedConfig {
    let source = find_config_path(workspace);

    let raw = match &source {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            match load_raw_config(path) {
                Ok(raw) => raw,
                Err(e) => {
                    warn!("Failed to load configuration file: {}", e);
                    RawConfig::default()
                }
            }
        }
        None => {
            debug!("No configuration file found under {}", workspace.display());
            RawConfig::default()
        }
    };

    LoadedConfig {
        config: normalize(&raw),
        source,
    }
}
