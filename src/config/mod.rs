//! Configuration module for covgate
//!
//! This module handles:
//! - The coverage gate config file (`.github/coverage.yml` and friends)
//! - Normalization of sparse configs into fully populated ones
//! - Ignore glob matching

mod coverage_config;
mod ignore;
mod loader;

pub use coverage_config::{
    normalize,
    NormalizedConfig,
    PatchStatusConfig,
    ProjectStatusConfig,
    ProjectTarget,
    RawConfig,
    RawCoverageSection,
    RawScopeConfig,
    RawStatusSection,
    StatusConfig,
    DEFAULT_PATCH_TARGET,
};
pub use ignore::IgnoreMatcher;
pub use loader::{
    find_config_path,
    load_config,
    load_raw_config,
    parse_raw_config,
    workspace_root,
    ConfigError,
    LoadedConfig,
    CONFIG_CANDIDATES,
    WORKSPACE_ENV,
};
