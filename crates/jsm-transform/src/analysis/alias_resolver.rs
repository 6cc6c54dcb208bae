//! Namespace alias resolution
//!
//! Finds the local names that provably denote the privileged root namespace
//! (`const C = Components;`) and, from those, the names that denote its
//! `utils` import capability (`const {utils: Cu} = C;`, `const Cu = C.utils;`).

use crate::names::UTILS_PROPERTY;
use jsm_ast::ast::{Expression, Pattern, PatternProperty, Statement};
use std::collections::BTreeSet;
use tracing::{debug, trace};

/// Names denoting the root namespace, the root itself included
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AliasSet {
    names: BTreeSet<String>,
}

/// Names denoting the `utils` sub-namespace of an [`AliasSet`] member
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UtilsAliasSet {
    names: BTreeSet<String>,
}

impl AliasSet {
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Names in lexical order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl UtilsAliasSet {
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Names in lexical order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Alias resolver over one program's top-level statements
pub struct AliasResolver<'a> {
    body: &'a [Statement],
}

impl<'a> AliasResolver<'a> {
    /// Create a resolver over top-level statements
    pub fn new(body: &'a [Statement]) -> Self {
        Self { body }
    }

    /// Initialized declarators of all top-level declarations
    fn bindings(&self) -> impl Iterator<Item = (&'a Pattern, &'a Expression)> {
        let body = self.body;
        body.iter()
            .filter_map(Statement::as_declaration)
            .flat_map(|decl| decl.initialized())
    }

    /// Collect every name bound to a bare reference of `root` or of a name
    /// already collected
    ///
    /// Iterates to a fixpoint: each pass scans all declarations and the loop
    /// stops after the first pass that adds nothing, so reference cycles
    /// terminate after at most one pass per collected name.
    pub fn resolve_aliases(&self, root: &str) -> AliasSet {
        let mut names = BTreeSet::from([root.to_string()]);
        let mut passes = 0;

        loop {
            passes += 1;
            let mut added = false;

            for (id, init) in self.bindings() {
                let (Some(name), Some(source)) = (id.as_identifier(), init.as_identifier()) else {
                    continue;
                };
                if names.contains(source) && names.insert(name.to_string()) {
                    debug!(alias = name, of = source, "found namespace alias");
                    added = true;
                }
            }

            if !added {
                break;
            }
        }

        trace!(root, passes, count = names.len(), "alias resolution reached fixpoint");
        AliasSet { names }
    }

    /// Collect the names bound to `<alias>.utils`
    ///
    /// Recognizes `const {utils} = A;`, `const {utils: Cu} = A;` and
    /// `const Cu = A.utils;` for `A` in `aliases`. Names bound to these
    /// utils aliases are not followed further.
    pub fn resolve_utils_aliases(&self, aliases: &AliasSet) -> UtilsAliasSet {
        let mut names = BTreeSet::new();

        for (id, init) in self.bindings() {
            match (id, init) {
                (Pattern::Object(object), Expression::Identifier(source))
                    if aliases.contains(&source.name) =>
                {
                    let locals = object.properties.iter().filter_map(|property| match property {
                        PatternProperty::Property(property)
                            if property.key_name() == Some(UTILS_PROPERTY) =>
                        {
                            property.value.as_identifier()
                        }
                        _ => None,
                    });
                    for local in locals {
                        if names.insert(local.to_string()) {
                            debug!(alias = local, of = %source.name, "found utils alias by destructuring");
                        }
                    }
                }
                (Pattern::Identifier(local), Expression::Member(member))
                    if member.property_name() == Some(UTILS_PROPERTY)
                        && member.object_name().is_some_and(|name| aliases.contains(name)) =>
                {
                    if names.insert(local.name.clone()) {
                        debug!(alias = %local.name, "found utils alias by member access");
                    }
                }
                _ => {}
            }
        }

        UtilsAliasSet { names }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsm_ast::ast::VariableKind;

    fn alias(name: &str, source: &str) -> Statement {
        Statement::declare(
            VariableKind::Const,
            Pattern::identifier(name),
            Expression::identifier(source),
        )
    }

    #[test]
    fn test_root_is_always_an_alias() {
        let body = vec![];
        let aliases = AliasResolver::new(&body).resolve_aliases("Components");

        assert_eq!(aliases.len(), 1);
        assert!(aliases.contains("Components"));
    }

    #[test]
    fn test_transitive_aliases() {
        // const A = Components; const B = A;
        let body = vec![alias("A", "Components"), alias("B", "A")];
        let aliases = AliasResolver::new(&body).resolve_aliases("Components");

        assert_eq!(aliases.iter().collect::<Vec<_>>(), vec!["A", "B", "Components"]);
    }

    #[test]
    fn test_aliases_declared_out_of_order() {
        // const B = A; const A = Components;
        let body = vec![alias("B", "A"), alias("A", "Components")];
        let aliases = AliasResolver::new(&body).resolve_aliases("Components");

        assert!(aliases.contains("A"));
        assert!(aliases.contains("B"));
    }

    #[test]
    fn test_reference_cycle_terminates() {
        // const A = B; const B = A; const C = Components; const Components = C;
        let body = vec![
            alias("A", "B"),
            alias("B", "A"),
            alias("C", "Components"),
            alias("Components", "C"),
        ];
        let aliases = AliasResolver::new(&body).resolve_aliases("Components");

        assert_eq!(aliases.iter().collect::<Vec<_>>(), vec!["C", "Components"]);
    }

    #[test]
    fn test_member_access_is_not_an_alias() {
        // const U = Components.utils; const R = foo(Components);
        let body = vec![
            Statement::declare(
                VariableKind::Const,
                Pattern::identifier("U"),
                Expression::member(Expression::identifier("Components"), "utils"),
            ),
            Statement::declare(
                VariableKind::Const,
                Pattern::identifier("R"),
                Expression::call(
                    Expression::identifier("foo"),
                    vec![Expression::identifier("Components")],
                ),
            ),
        ];
        let aliases = AliasResolver::new(&body).resolve_aliases("Components");

        assert_eq!(aliases.len(), 1);
    }

    #[test]
    fn test_utils_alias_by_member_access() {
        // const C = Components; const Cu = C.utils;
        let body = vec![
            alias("C", "Components"),
            Statement::declare(
                VariableKind::Const,
                Pattern::identifier("Cu"),
                Expression::member(Expression::identifier("C"), "utils"),
            ),
        ];
        let resolver = AliasResolver::new(&body);
        let utils = resolver.resolve_utils_aliases(&resolver.resolve_aliases("Components"));

        assert_eq!(utils.iter().collect::<Vec<_>>(), vec!["Cu"]);
    }

    #[test]
    fn test_utils_alias_by_destructuring() {
        // const {utils} = Components; const {utils: Cu, classes: Cc} = Components;
        let body = vec![
            Statement::declare(
                VariableKind::Const,
                Pattern::shorthand_object(["utils"]),
                Expression::identifier("Components"),
            ),
            Statement::declare(
                VariableKind::Const,
                Pattern::renamed_object([("utils", "Cu"), ("classes", "Cc")]),
                Expression::identifier("Components"),
            ),
        ];
        let resolver = AliasResolver::new(&body);
        let utils = resolver.resolve_utils_aliases(&resolver.resolve_aliases("Components"));

        assert_eq!(utils.iter().collect::<Vec<_>>(), vec!["Cu", "utils"]);
        assert!(!utils.contains("Cc"));
    }

    #[test]
    fn test_utils_alias_from_unrelated_object() {
        // const {utils: Cu} = Other; const Cx = Other.utils;
        let body = vec![
            Statement::declare(
                VariableKind::Const,
                Pattern::renamed_object([("utils", "Cu")]),
                Expression::identifier("Other"),
            ),
            Statement::declare(
                VariableKind::Const,
                Pattern::identifier("Cx"),
                Expression::member(Expression::identifier("Other"), "utils"),
            ),
        ];
        let resolver = AliasResolver::new(&body);
        let utils = resolver.resolve_utils_aliases(&resolver.resolve_aliases("Components"));

        assert!(utils.is_empty());
    }

    #[test]
    fn test_utils_aliases_are_not_chased() {
        // const Cu = Components.utils; const Cu2 = Cu;
        let body = vec![
            Statement::declare(
                VariableKind::Const,
                Pattern::identifier("Cu"),
                Expression::member(Expression::identifier("Components"), "utils"),
            ),
            alias("Cu2", "Cu"),
        ];
        let resolver = AliasResolver::new(&body);
        let utils = resolver.resolve_utils_aliases(&resolver.resolve_aliases("Components"));

        assert!(utils.contains("Cu"));
        assert!(!utils.contains("Cu2"));
    }
}
