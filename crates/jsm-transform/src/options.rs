//! Transform configuration
//!
//! Selects which module specifiers are rewritten and whether the matched
//! prefix is removed from the resulting `require` path.

use crate::error::{Result, TransformError};
use regex::Regex;
use serde::Deserialize;
use std::fmt;

/// Pattern used by [`TransformOptions::default`]
pub const DEFAULT_PATH_PATTERN: &str = "^resource://";

/// Rule selecting the module specifiers eligible for rewriting
#[derive(Debug, Clone)]
pub enum PathPattern {
    /// Literal `starts_with` test
    Prefix(String),

    /// Unanchored regex search; anchor with `^` to match a prefix
    Regex(Regex),
}

impl PathPattern {
    /// Create a literal prefix pattern
    pub fn prefix(prefix: impl Into<String>) -> Self {
        PathPattern::Prefix(prefix.into())
    }

    /// Compile a regex pattern
    pub fn regex(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(PathPattern::Regex)
            .map_err(|source| TransformError::InvalidPathPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    /// Check whether a specifier is eligible
    pub fn is_match(&self, specifier: &str) -> bool {
        match self {
            PathPattern::Prefix(prefix) => specifier.starts_with(prefix.as_str()),
            PathPattern::Regex(regex) => regex.is_match(specifier),
        }
    }

    /// Remove the matched part of a specifier
    ///
    /// Only the first regex match is removed. A specifier that does not
    /// match is returned unchanged.
    pub fn strip(&self, specifier: &str) -> String {
        match self {
            PathPattern::Prefix(prefix) => specifier
                .strip_prefix(prefix.as_str())
                .unwrap_or(specifier)
                .to_string(),
            PathPattern::Regex(regex) => regex.replacen(specifier, 1, "").into_owned(),
        }
    }

    /// Source text of the pattern
    pub fn as_str(&self) -> &str {
        match self {
            PathPattern::Prefix(prefix) => prefix,
            PathPattern::Regex(regex) => regex.as_str(),
        }
    }
}

impl Default for PathPattern {
    fn default() -> Self {
        PathPattern::Regex(
            Regex::new(DEFAULT_PATH_PATTERN).expect("default path pattern is a valid regex"),
        )
    }
}

impl PartialEq for PathPattern {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PathPattern::Prefix(a), PathPattern::Prefix(b)) => a == b,
            (PathPattern::Regex(a), PathPattern::Regex(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathPattern::Prefix(prefix) => write!(f, "prefix '{}'", prefix),
            PathPattern::Regex(regex) => write!(f, "regex /{}/", regex.as_str()),
        }
    }
}

/// Path pattern as written in a configuration source
///
/// A bare string is always a literal prefix, whatever it looks like. A regex
/// must be spelled out as `{ regex = "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PathPatternSpec {
    Literal(String),
    Explicit {
        #[serde(default)]
        prefix: Option<String>,
        #[serde(default)]
        regex: Option<String>,
    },
}

impl PathPatternSpec {
    /// Validate and compile the pattern
    pub fn resolve(self) -> Result<PathPattern> {
        match self {
            PathPatternSpec::Literal(text) => Ok(PathPattern::Prefix(text)),
            PathPatternSpec::Explicit {
                prefix: Some(prefix),
                regex: None,
            } => Ok(PathPattern::Prefix(prefix)),
            PathPatternSpec::Explicit {
                prefix: None,
                regex: Some(regex),
            } => PathPattern::regex(&regex),
            PathPatternSpec::Explicit {
                prefix: Some(prefix),
                regex: Some(regex),
            } => Err(TransformError::AmbiguousPathPattern(format!(
                "both prefix '{}' and regex '{}' given",
                prefix, regex
            ))),
            PathPatternSpec::Explicit {
                prefix: None,
                regex: None,
            } => Err(TransformError::AmbiguousPathPattern(
                "neither prefix nor regex given".to_string(),
            )),
        }
    }
}

/// Transform options
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawOptions")]
pub struct TransformOptions {
    /// Specifiers eligible for rewriting (default: `^resource://`)
    pub path_pattern: PathPattern,
    /// Remove the matched prefix from rewritten specifiers (default: false)
    pub strip_prefix: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOptions {
    #[serde(default, alias = "basePath", alias = "path_pattern")]
    path_pattern: Option<PathPatternSpec>,
    #[serde(default, alias = "replace", alias = "strip_prefix")]
    strip_prefix: bool,
}

impl TryFrom<RawOptions> for TransformOptions {
    type Error = TransformError;

    fn try_from(raw: RawOptions) -> Result<Self> {
        let path_pattern = match raw.path_pattern {
            Some(spec) => spec.resolve()?,
            None => PathPattern::default(),
        };
        Ok(TransformOptions {
            path_pattern,
            strip_prefix: raw.strip_prefix,
        })
    }
}

impl TransformOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the path pattern
    pub fn with_path_pattern(mut self, path_pattern: PathPattern) -> Self {
        self.path_pattern = path_pattern;
        self
    }

    /// Set whether the matched prefix is stripped
    pub fn with_strip_prefix(mut self, strip_prefix: bool) -> Self {
        self.strip_prefix = strip_prefix;
        self
    }

    /// Output specifier for an eligible input specifier, `None` otherwise
    pub fn resolve_specifier(&self, specifier: &str) -> Option<String> {
        if !self.path_pattern.is_match(specifier) {
            return None;
        }
        if self.strip_prefix {
            Some(self.path_pattern.strip(specifier))
        } else {
            Some(specifier.to_string())
        }
    }
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            path_pattern: PathPattern::default(),
            strip_prefix: false,
        }
    }
}
