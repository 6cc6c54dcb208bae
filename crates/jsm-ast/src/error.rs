//! Error types for the program tree

use thiserror::Error;

/// Tree (de)serialization error
#[derive(Error, Debug)]
pub enum AstError {
    /// Malformed JSON or a node that does not fit its expected shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Root node is neither a `File` nor a `Program`
    #[error("Unexpected root node: {0}")]
    UnexpectedRoot(String),
}

pub type Result<T> = std::result::Result<T, AstError>;
