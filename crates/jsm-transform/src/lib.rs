//! JSM Transform - JSM to CommonJS rewrite engine
//!
//! This crate rewrites the top-level statements of one program tree from
//! the legacy JSM module idiom into `require`/`module.exports`:
//! - `Components.utils.import(...)` / `ChromeUtils.import(...)` bindings
//! - `XPCOMUtils.defineLazyModuleGetter(...)` statements
//! - `this.EXPORTED_SYMBOLS = [...]` manifests and `this.NAME = ...` exports

pub mod analysis;
pub mod error;
pub mod names;
pub mod options;
pub mod rewrite;
pub mod transformer;

// Re-export main types
pub use error::{Result, TransformError};
pub use options::{PathPattern, PathPatternSpec, TransformOptions};
pub use transformer::{AppliedRewrite, TransformReport, Transformer};

// Re-export analysis and rewrite types
pub use analysis::{AliasResolver, AliasSet, UtilsAliasSet};
pub use rewrite::{
    ExportCapture, ExportManifest, ExportRewriter, ImportCallBinding, ImportCallRewriter,
    LazyGetterCall, LazyGetterRewriter, RuleKind, SelfExportAssignment,
};

use jsm_ast::Program;

/// Run the rewrite once over `program` with the given options
pub fn transform(program: &mut Program, options: &TransformOptions) -> Result<TransformReport> {
    Transformer::with_options(options.clone()).transform(program)
}
