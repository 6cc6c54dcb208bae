//! JSM AST - Program tree for the JSM to CommonJS rewrite
//!
//! This crate provides the tree consumed and produced by `jsm-transform`:
//! - Top-level statements (declarations, expression statements)
//! - The expression and binding-pattern shapes the rewrite rules inspect
//! - Opaque passthrough for every other node kind
//! - Error types
//!
//! Nodes use the Babel JSON AST layout, so a tree produced by a JavaScript
//! parser can be handed over as JSON and printed again after the rewrite.

pub mod ast;
pub mod error;

// Re-export commonly used types
pub use ast::{Expression, Pattern, Program, Statement};
pub use error::{AstError, Result};
