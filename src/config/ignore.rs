//! Matching paths against the configured `ignore` globs

use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;
use tracing::warn;

/// Compiled `coverage.ignore` patterns.
///
/// Invalid patterns are skipped with a warning rather than rejecting the
/// whole config.
#[derive(Debug, Clone)]
pub struct IgnoreMatcher {
    set: GlobSet,
    patterns: Vec<String>,
}

impl IgnoreMatcher {
    pub fn new(patterns: &[String]) -> Self {
        let mut builder = GlobSetBuilder::new();
        let mut accepted = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            match Glob::new(pattern) {
                Ok(glob) => {
                    builder.add(glob);
                    accepted.push(pattern.clone());
                }
                Err(e) => warn!("Skipping invalid ignore pattern '{}': {}", pattern, e),
            }
        }
        let set = builder.build().unwrap_or_else(|e| {
            warn!("Failed to build ignore globset: {}", e);
            GlobSet::empty()
        });
        Self {
            set,
            patterns: accepted,
        }
    }

    /// Patterns that compiled successfully, in config order
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Whether a repository-relative path is excluded from coverage
    pub fn is_ignored(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        let path = path.strip_prefix("./").unwrap_or(path);
        self.set.is_match(path)
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}
