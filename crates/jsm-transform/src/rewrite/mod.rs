//! Rewrite rules
//!
//! Each rule has a matcher producing a typed match ([`ImportCallBinding`],
//! [`LazyGetterCall`], [`ExportCapture`], [`SelfExportAssignment`]) and a
//! rewriter turning the match into output nodes. The transformer runs the
//! rules in a fixed order over the same statement list.

pub mod exports;
pub mod import_call;
pub mod lazy_getter;

// Re-export for convenience
pub use exports::{ExportCapture, ExportManifest, ExportOutcome, ExportRewriter, SelfExportAssignment};
pub use import_call::{ImportCallBinding, ImportCallRewriter};
pub use lazy_getter::{LazyGetterCall, LazyGetterRewriter};

use crate::names::MODULE_LOADER;
use jsm_ast::ast::NodeFields;
use jsm_ast::{Expression, Statement};
use serde_json::Value;
use std::fmt;

/// Trigger shapes recognized by the rewrite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// `const {a} = Cu.import("resource://...", this);`
    ImportCallBinding,
    /// `XPCOMUtils.defineLazyModuleGetter(this, "a", "resource://...");`
    LazyGetterCall,
    /// `this.EXPORTED_SYMBOLS = ["a"];`
    ExportCapture,
    /// `this.a = value;`
    SelfExportAssignment,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RuleKind::ImportCallBinding => "import-call",
            RuleKind::LazyGetterCall => "lazy-getter",
            RuleKind::ExportCapture => "export-capture",
            RuleKind::SelfExportAssignment => "self-export",
        };
        f.write_str(name)
    }
}

/// What happens to one top-level statement
pub(crate) enum Edit {
    Keep,
    Replace(Statement),
    Remove,
}

/// Rebuild `body` by applying `edit` to every statement in order
///
/// A replacement takes over the comments of the statement it replaces.
/// Leading comments of a removed statement move to the next statement
/// that stays, or trail the last one when nothing follows.
pub(crate) fn apply_edits<F>(body: &mut Vec<Statement>, mut edit: F)
where
    F: FnMut(&mut Statement) -> Edit,
{
    let statements = std::mem::take(body);
    body.reserve(statements.len());
    let mut orphaned: Vec<Value> = Vec::new();

    for mut statement in statements {
        let mut output = match edit(&mut statement) {
            Edit::Keep => statement,
            Edit::Replace(mut replacement) => {
                replacement.attach_comments(statement.take_comments());
                replacement
            }
            Edit::Remove => {
                if let Some(Value::Array(leading)) =
                    statement.take_comments().remove("leadingComments")
                {
                    orphaned.extend(leading);
                }
                continue;
            }
        };
        if !orphaned.is_empty() {
            output.attach_comments(comments("leadingComments", std::mem::take(&mut orphaned)));
        }
        body.push(output);
    }

    if let Some(last) = body.last_mut() {
        if !orphaned.is_empty() {
            last.attach_comments(comments("trailingComments", orphaned));
        }
    }
}

fn comments(key: &str, list: Vec<Value>) -> NodeFields {
    let mut fields = NodeFields::default();
    fields.insert(key, Value::Array(list));
    fields
}

/// `require("<specifier>")`
pub fn module_load(specifier: impl Into<String>) -> Expression {
    Expression::call(
        Expression::identifier(MODULE_LOADER),
        vec![Expression::string(specifier)],
    )
}
