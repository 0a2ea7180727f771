//! Coverage gate configuration
//!
//! A user-supplied config file is sparse: any section may be missing, and a
//! malformed section is treated as missing. [`normalize`] resolves it into a
//! [`NormalizedConfig`] where every field is populated.
//!
//! # Configuration Format
//!
//! ```yaml
//! # .github/coverage.yml
//! coverage:
//!   status:
//!     project:
//!       target: auto     # or an absolute percentage, e.g. 90
//!       threshold: 1     # allowed drop (percentage points) for `auto`
//!     patch:
//!       target: 80
//!   ignore:
//!     - "test/**"
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;
use tracing::debug;

/// Patch target used when none (or a non-numeric one) is configured
pub const DEFAULT_PATCH_TARGET: f64 = 80.0;

/// Deserialize an optional section, treating a malformed one as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match serde_yaml::from_value(v) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            debug!("Ignoring malformed config value: {}", e);
            None
        }
    }))
}

/// Deserialize the ignore list entry by entry, so one bad entry does not
/// discard the valid globs around it.
fn lenient_patterns<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Sequence(items)) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(pattern) => Some(pattern),
                    other => {
                        debug!("Skipping non-string ignore entry: {:?}", other);
                        None
                    }
                })
                .collect(),
        ),
        Some(Value::Null) | None => None,
        Some(other) => {
            debug!("Ignoring malformed ignore list: {:?}", other);
            None
        }
    })
}

/// Config file root, as written by the user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawConfig {
    #[serde(default, deserialize_with = "lenient")]
    pub coverage: Option<RawCoverageSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCoverageSection {
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<RawStatusSection>,

    /// Glob patterns for files excluded from coverage
    #[serde(default, deserialize_with = "lenient_patterns")]
    pub ignore: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawStatusSection {
    #[serde(default, deserialize_with = "lenient")]
    pub project: Option<RawScopeConfig>,
    #[serde(default, deserialize_with = "lenient")]
    pub patch: Option<RawScopeConfig>,
}

/// `{target, threshold}` pair for one status scope.
///
/// `target` is kept as a raw YAML value: project and patch scopes interpret
/// it differently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawScopeConfig {
    #[serde(default)]
    pub target: Option<Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub threshold: Option<f64>,
}

/// Whole numbers render as YAML integers so `90` round-trips as `90`, not `90.0`.
fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        Value::Number((n as i64).into())
    } else {
        Value::Number(n.into())
    }
}

/// Project coverage target
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ProjectTarget {
    /// Compare against the base branch report
    #[default]
    Auto,
    /// Absolute line coverage percentage
    Absolute(f64),
    /// Any other configured value, kept verbatim
    Unrecognized(String),
}

impl ProjectTarget {
    /// Interpret a configured target value without coercion
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Number(n) => match n.as_f64() {
                Some(target) => ProjectTarget::Absolute(target),
                None => ProjectTarget::Unrecognized(n.to_string()),
            },
            Value::String(s) if s == "auto" => ProjectTarget::Auto,
            Value::String(s) => ProjectTarget::Unrecognized(s.clone()),
            other => ProjectTarget::Unrecognized(
                serde_yaml::to_string(other)
                    .map(|s| s.trim_end().to_string())
                    .unwrap_or_default(),
            ),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            ProjectTarget::Auto => Value::String("auto".to_string()),
            ProjectTarget::Absolute(target) => number_value(*target),
            ProjectTarget::Unrecognized(raw) => Value::String(raw.clone()),
        }
    }
}

impl std::fmt::Display for ProjectTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectTarget::Auto => write!(f, "auto"),
            ProjectTarget::Absolute(target) => write!(f, "{}", target),
            ProjectTarget::Unrecognized(raw) => write!(f, "{}", raw),
        }
    }
}

/// Resolved project status settings
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProjectStatusConfig {
    pub target: ProjectTarget,
    /// Allowed drop in percentage points when `target` is `auto`.
    /// `None` means no drop is tolerated.
    pub threshold: Option<f64>,
}

/// Resolved patch status settings
#[derive(Debug, Clone, PartialEq)]
pub struct PatchStatusConfig {
    pub target: f64,
    pub threshold: Option<f64>,
}

impl Default for PatchStatusConfig {
    fn default() -> Self {
        Self {
            target: DEFAULT_PATCH_TARGET,
            threshold: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatusConfig {
    pub project: ProjectStatusConfig,
    pub patch: PatchStatusConfig,
}

/// Fully populated configuration used by the gate checks
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedConfig {
    pub status: StatusConfig,
    pub ignore: Vec<String>,
}

/// Resolve a sparse raw config into a fully populated one.
///
/// Each field is resolved independently; a present value wins over the
/// default, including an explicit `threshold: 0`.
pub fn normalize(raw: &RawConfig) -> NormalizedConfig {
    let coverage = raw.coverage.as_ref();
    let status = coverage.and_then(|c| c.status.as_ref());
    let project = status.and_then(|s| s.project.as_ref());
    let patch = status.and_then(|s| s.patch.as_ref());

    NormalizedConfig {
        status: StatusConfig {
            project: ProjectStatusConfig {
                target: project
                    .and_then(|p| p.target.as_ref())
                    .map(ProjectTarget::from_value)
                    .unwrap_or_default(),
                threshold: project.and_then(|p| p.threshold),
            },
            patch: PatchStatusConfig {
                // Patch scope has no `auto` mode
                target: patch
                    .and_then(|p| p.target.as_ref())
                    .and_then(Value::as_f64)
                    .unwrap_or(DEFAULT_PATCH_TARGET),
                threshold: patch.and_then(|p| p.threshold),
            },
        },
        ignore: coverage
            .and_then(|c| c.ignore.clone())
            .unwrap_or_default(),
    }
}

impl From<&RawConfig> for NormalizedConfig {
    fn from(raw: &RawConfig) -> Self {
        normalize(raw)
    }
}

impl NormalizedConfig {
    /// Render back into the file shape, with every field present
    pub fn to_raw(&self) -> RawConfig {
        RawConfig {
            coverage: Some(RawCoverageSection {
                status: Some(RawStatusSection {
                    project: Some(RawScopeConfig {
                        target: Some(self.status.project.target.to_value()),
                        threshold: self.status.project.threshold,
                    }),
                    patch: Some(RawScopeConfig {
                        target: Some(number_value(self.status.patch.target)),
                        threshold: self.status.patch.threshold,
                    }),
                }),
                ignore: Some(self.ignore.clone()),
            }),
        }
    }
}
