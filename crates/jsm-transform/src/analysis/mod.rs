//! Analysis module
//!
//! Read-only passes over the top-level statements that feed the rewrite rules.

pub mod alias_resolver;

// Re-export for convenience
pub use alias_resolver::{AliasResolver, AliasSet, UtilsAliasSet};
