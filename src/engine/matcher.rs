//! Path matchers for file selection
//!
//! A matcher is a predicate over a filesystem path: a regular expression or
//! a compiled glob tested against the path relative to a base directory, or
//! an OR-composite of other matchers.

use crate::config::PatternConfig;
use crate::error::{ConfigError, ConfigResult};
use globset::{GlobBuilder, GlobMatcher};
use regex::Regex;
use std::path::Path;

/// A path-acceptance predicate, composable via logical OR
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Regular expression over the relativized path
    Pattern(Regex),

    /// Compiled glob over the relativized path
    Glob(GlobMatcher),

    /// True if any child matcher accepts the path
    Any(Vec<Matcher>),
}

impl Matcher {
    /// Build a leaf matcher from a regular expression
    pub fn pattern(pattern: &str) -> ConfigResult<Self> {
        let regex = Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            error: e.to_string(),
        })?;
        Ok(Matcher::Pattern(regex))
    }

    /// Build a leaf matcher from a glob
    ///
    /// `*` does not cross path separators; use `**` to match across
    /// directories. The glob always matches the whole relativized path.
    pub fn glob(pattern: &str) -> ConfigResult<Self> {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| ConfigError::InvalidPattern {
                pattern: pattern.to_string(),
                error: e.to_string(),
            })?;
        Ok(Matcher::Glob(glob.compile_matcher()))
    }

    /// Build an OR-composite of matchers
    pub fn any(matchers: Vec<Matcher>) -> Self {
        Matcher::Any(matchers)
    }

    /// Build a matcher from document pattern entries
    ///
    /// No entries means no matcher; a single entry becomes a leaf; several
    /// entries become an OR-composite in declaration order.
    pub fn from_patterns(patterns: &[PatternConfig]) -> ConfigResult<Option<Self>> {
        let mut matchers = patterns
            .iter()
            .map(|p| match p {
                PatternConfig::Pattern(regex) => Matcher::pattern(regex),
                PatternConfig::Glob { glob } => Matcher::glob(glob),
            })
            .collect::<ConfigResult<Vec<_>>>()?;

        Ok(match matchers.len() {
            0 => None,
            1 => Some(matchers.remove(0)),
            _ => Some(Matcher::any(matchers)),
        })
    }

    /// Test a path against this matcher
    ///
    /// A leading `base_dir` prefix is stripped before the pattern is tested;
    /// a path outside the base directory is tested as-is. The composite
    /// variant stops at the first accepting child.
    pub fn matches(&self, path: &Path, base_dir: &Path) -> bool {
        let relative = path.strip_prefix(base_dir).unwrap_or(path);
        match self {
            Matcher::Pattern(regex) => regex.is_match(&relative.to_string_lossy()),
            Matcher::Glob(glob) => glob.is_match(relative),
            Matcher::Any(matchers) => matchers.iter().any(|m| m.matches(path, base_dir)),
        }
    }
}
