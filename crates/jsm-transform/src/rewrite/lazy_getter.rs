//! Lazy getter rewriter
//!
//! `XPCOMUtils.defineLazyModuleGetter(this, "Foo", "resource://Foo.jsm");`
//! becomes `var {Foo} = require("resource://Foo.jsm");`.

use super::{apply_edits, module_load, Edit};
use crate::names::{LAZY_GETTER_HOSTS, LAZY_GETTER_METHODS};
use crate::options::TransformOptions;
use jsm_ast::ast::{Expression, Pattern, Statement, VariableKind};
use tracing::{debug, trace};

/// Matched lazy getter declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LazyGetterCall {
    /// Name defined on the target object
    pub name: String,
    /// Specifier as written in the call
    pub source: String,
    /// Specifier passed to the module loader
    pub specifier: String,
}

impl LazyGetterCall {
    /// `var {name} = require("<specifier>");`
    pub fn to_statement(&self) -> Statement {
        Statement::declare(
            VariableKind::Var,
            Pattern::shorthand_object([self.name.as_str()]),
            module_load(self.specifier.clone()),
        )
    }
}

/// Rewrites top-level lazy getter statements
pub struct LazyGetterRewriter<'a> {
    options: &'a TransformOptions,
}

impl<'a> LazyGetterRewriter<'a> {
    pub fn new(options: &'a TransformOptions) -> Self {
        Self { options }
    }

    /// Replace every eligible statement, returning the matches in source order
    pub fn rewrite(&self, body: &mut Vec<Statement>) -> Vec<LazyGetterCall> {
        let mut rewritten = Vec::new();

        apply_edits(body, |statement| match self.match_statement(statement) {
            Some(getter) => {
                debug!(name = %getter.name, specifier = %getter.specifier, "rewrote lazy module getter");
                let replacement = getter.to_statement();
                rewritten.push(getter);
                Edit::Replace(replacement)
            }
            None => Edit::Keep,
        });

        rewritten
    }

    /// Match `<host>.<method>(target, "<name>", "<specifier>")`
    ///
    /// The target argument must be present but is not inspected.
    pub fn match_statement(&self, statement: &Statement) -> Option<LazyGetterCall> {
        let Some(Expression::Call(call)) = statement.as_expression() else {
            return None;
        };
        let Expression::Member(callee) = call.callee.as_ref() else {
            return None;
        };
        let host = callee.object_name()?;
        let method = callee.property_name()?;
        if !LAZY_GETTER_HOSTS.contains(&host) || !LAZY_GETTER_METHODS.contains(&method) {
            return None;
        }

        let [_target, name, source, ..] = call.arguments.as_slice() else {
            trace!(host, method, "lazy getter with fewer than three arguments");
            return None;
        };
        let (Some(name), Some(source)) = (name.as_string_literal(), source.as_string_literal())
        else {
            trace!(host, method, "lazy getter with non-literal arguments");
            return None;
        };

        let Some(specifier) = self.options.resolve_specifier(source) else {
            trace!(source, pattern = %self.options.path_pattern, "lazy getter path outside pattern");
            return None;
        };

        Some(LazyGetterCall {
            name: name.to_string(),
            source: source.to_string(),
            specifier,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::PathPattern;

    fn getter(host: &str, method: &str, args: Vec<Expression>) -> Statement {
        Statement::expression(Expression::call(
            Expression::member(Expression::identifier(host), method),
            args,
        ))
    }

    fn standard_args(name: &str, path: &str) -> Vec<Expression> {
        vec![Expression::this(), Expression::string(name), Expression::string(path)]
    }

    #[test]
    fn test_rewrite_lazy_module_getter() {
        let options = TransformOptions::default();
        let mut body = vec![getter(
            "XPCOMUtils",
            "defineLazyModuleGetter",
            standard_args("Foo", "resource://Foo.jsm"),
        )];

        let rewritten = LazyGetterRewriter::new(&options).rewrite(&mut body);

        assert_eq!(rewritten.len(), 1);
        assert_eq!(
            body,
            vec![Statement::declare(
                VariableKind::Var,
                Pattern::shorthand_object(["Foo"]),
                module_load("resource://Foo.jsm"),
            )]
        );
    }

    #[test]
    fn test_all_hosts_and_methods() {
        let options = TransformOptions::default();
        let rewriter = LazyGetterRewriter::new(&options);

        for host in LAZY_GETTER_HOSTS {
            for method in LAZY_GETTER_METHODS {
                let statement = getter(host, method, standard_args("A", "resource://a.jsm"));
                assert!(
                    rewriter.match_statement(&statement).is_some(),
                    "{}.{} should match",
                    host,
                    method
                );
            }
        }
    }

    #[test]
    fn test_strip_prefix() {
        let options = TransformOptions::new()
            .with_path_pattern(PathPattern::prefix("resource://as/"))
            .with_strip_prefix(true);
        let statement = getter(
            "ChromeUtils",
            "defineModuleGetter",
            standard_args("Foo", "resource://as/Foo.jsm"),
        );

        let matched = LazyGetterRewriter::new(&options)
            .match_statement(&statement)
            .unwrap();
        assert_eq!(matched.specifier, "Foo.jsm");
        assert_eq!(matched.source, "resource://as/Foo.jsm");
    }

    #[test]
    fn test_path_mismatch_is_unchanged() {
        let options = TransformOptions::default();
        let original = getter(
            "XPCOMUtils",
            "defineLazyModuleGetter",
            standard_args("Foo", "chrome://Foo.jsm"),
        );
        let mut body = vec![original.clone()];

        let rewritten = LazyGetterRewriter::new(&options).rewrite(&mut body);

        assert!(rewritten.is_empty());
        assert_eq!(body, vec![original]);
    }

    #[test]
    fn test_unrelated_calls_are_unchanged() {
        let options = TransformOptions::default();
        let rewriter = LazyGetterRewriter::new(&options);

        let other_method = getter("XPCOMUtils", "defineLazyGetter", standard_args("A", "resource://a"));
        let other_host = getter("Services", "defineModuleGetter", standard_args("A", "resource://a"));
        let too_few = getter(
            "XPCOMUtils",
            "defineLazyModuleGetter",
            vec![Expression::this(), Expression::string("A")],
        );
        let non_literal = getter(
            "XPCOMUtils",
            "defineLazyModuleGetter",
            vec![
                Expression::this(),
                Expression::identifier("name"),
                Expression::string("resource://a"),
            ],
        );

        for statement in [other_method, other_host, too_few, non_literal] {
            assert!(rewriter.match_statement(&statement).is_none());
        }
    }

    #[test]
    fn test_target_argument_is_not_validated() {
        let options = TransformOptions::default();
        let statement = getter(
            "XPCOMUtils",
            "defineLazyModuleGetter",
            vec![
                Expression::identifier("lazy"),
                Expression::string("A"),
                Expression::string("resource://a.jsm"),
            ],
        );

        assert!(LazyGetterRewriter::new(&options)
            .match_statement(&statement)
            .is_some());
    }
}
