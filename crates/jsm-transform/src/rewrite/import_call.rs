//! Import call rewriter
//!
//! `const {a, b} = Components.utils.import("resource://x.jsm", {});`
//! becomes `const {a, b} = require("resource://x.jsm");`.

use super::module_load;
use crate::analysis::{AliasSet, UtilsAliasSet};
use crate::names::{IMPORT_METHOD, IMPORT_NAMESPACE, UTILS_PROPERTY};
use crate::options::TransformOptions;
use jsm_ast::ast::{CallExpression, Expression, Statement};
use tracing::{debug, trace};

/// Matched import call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportCallBinding {
    /// Specifier as written in the call
    pub source: String,
    /// Specifier passed to the module loader
    pub specifier: String,
}

impl ImportCallBinding {
    /// Replacement module-load call; extra call arguments are dropped
    pub fn to_expression(&self) -> Expression {
        module_load(self.specifier.clone())
    }
}

/// Rewrites import calls inside destructuring declarations
pub struct ImportCallRewriter<'a> {
    aliases: &'a AliasSet,
    utils_aliases: &'a UtilsAliasSet,
    options: &'a TransformOptions,
}

impl<'a> ImportCallRewriter<'a> {
    pub fn new(
        aliases: &'a AliasSet,
        utils_aliases: &'a UtilsAliasSet,
        options: &'a TransformOptions,
    ) -> Self {
        Self {
            aliases,
            utils_aliases,
            options,
        }
    }

    /// Rewrite all eligible calls, returning them in source order
    ///
    /// Only declarators binding an object pattern are searched; a single
    /// name binding of an import call is left as is.
    pub fn rewrite(&self, body: &mut [Statement]) -> Vec<ImportCallBinding> {
        let mut rewritten = Vec::new();

        for statement in body.iter_mut() {
            let Statement::VariableDeclaration(decl) = statement else {
                continue;
            };
            for declarator in decl.declarations.iter_mut() {
                if !declarator.id.is_object() {
                    continue;
                }
                if let Some(init) = declarator.init.as_mut() {
                    self.rewrite_expression(init, &mut rewritten);
                }
            }
        }

        rewritten
    }

    fn rewrite_expression(&self, expr: &mut Expression, rewritten: &mut Vec<ImportCallBinding>) {
        if let Expression::Call(call) = &*expr {
            if let Some(binding) = self.match_call(call) {
                debug!(source = %binding.source, specifier = %binding.specifier, "rewrote import call");
                *expr = binding.to_expression();
                rewritten.push(binding);
                return;
            }
        }

        for child in expr.children_mut() {
            self.rewrite_expression(child, rewritten);
        }
    }

    /// Match `<receiver>.import("<specifier>", ...)`
    pub fn match_call(&self, call: &CallExpression) -> Option<ImportCallBinding> {
        let source = call.arguments.first()?.as_string_literal()?;
        let Expression::Member(callee) = call.callee.as_ref() else {
            return None;
        };
        if callee.property_name() != Some(IMPORT_METHOD) {
            return None;
        }
        if !self.is_import_receiver(&callee.object) {
            trace!(source, "import call on an unrelated receiver");
            return None;
        }

        let Some(specifier) = self.options.resolve_specifier(source) else {
            trace!(source, pattern = %self.options.path_pattern, "import path outside pattern");
            return None;
        };

        Some(ImportCallBinding {
            source: source.to_string(),
            specifier,
        })
    }

    /// `ChromeUtils`, a utils alias, or `<alias>.utils`
    fn is_import_receiver(&self, receiver: &Expression) -> bool {
        match receiver {
            Expression::Identifier(ident) => {
                ident.name == IMPORT_NAMESPACE || self.utils_aliases.contains(&ident.name)
            }
            Expression::Member(member) => {
                member.property_name() == Some(UTILS_PROPERTY)
                    && member
                        .object_name()
                        .is_some_and(|name| self.aliases.contains(name))
            }
            _ => false,
        }
    }
}
