//! Transform error types

use thiserror::Error;

/// Transform error
#[derive(Error, Debug)]
pub enum TransformError {
    /// Path pattern object naming both or neither of `prefix` and `regex`
    #[error("Ambiguous path pattern: {0}")]
    AmbiguousPathPattern(String),

    /// Regex path pattern that does not compile
    #[error("Invalid path pattern '{pattern}': {source}")]
    InvalidPathPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Export manifest element that is not a string literal
    #[error("Invalid export entry at index {index}: expected a string literal, found {found}")]
    InvalidExportEntry { index: usize, found: String },

    /// Export manifest assigned something other than an array literal
    #[error("Invalid export manifest: expected an array literal, found {0}")]
    InvalidExportManifest(String),
}

/// Result type for transform operations
pub type Result<T> = std::result::Result<T, TransformError>;
