//! Export rewriter and assembler
//!
//! Removes the `EXPORTED_SYMBOLS` manifest, turns `this.NAME = VALUE` into
//! plain bindings and assembles one `module.exports = {...}` statement that
//! goes after everything else in the program.

use super::{apply_edits, Edit};
use crate::error::{Result, TransformError};
use crate::names::{EXPORTS_PROPERTY, MANIFEST_SYMBOL, MODULE_OBJECT};
use jsm_ast::ast::{
    Expression, ObjectProperty, Pattern, Statement, VariableDeclarator, VariableKind,
};
use tracing::{debug, warn};

/// Ordered names exported by the transformed module
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExportManifest {
    names: Vec<String>,
}

impl ExportManifest {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn into_names(self) -> Vec<String> {
        self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// `module.exports = {a, b, ...};`, or `None` for an empty manifest
    pub fn assembly_statement(&self) -> Option<Statement> {
        if self.names.is_empty() {
            return None;
        }

        let target = Expression::member(Expression::identifier(MODULE_OBJECT), EXPORTS_PROPERTY);
        let object = Expression::object(
            self.names
                .iter()
                .map(|name| ObjectProperty::shorthand(name.as_str()))
                .collect(),
        );
        Some(Statement::expression(Expression::assign(target, object)))
    }
}

/// Parsed `EXPORTED_SYMBOLS` array
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportCapture {
    pub names: Vec<String>,
}

impl ExportCapture {
    /// Read the names of a manifest array
    ///
    /// Every element must be a string literal.
    pub fn parse(value: &Expression) -> Result<Self> {
        let Expression::Array(array) = value else {
            return Err(TransformError::InvalidExportManifest(value.kind().to_string()));
        };

        let names = array
            .elements
            .iter()
            .enumerate()
            .map(|(index, element)| match element {
                Some(Expression::StringLiteral(literal)) => Ok(literal.value.clone()),
                Some(other) => Err(TransformError::InvalidExportEntry {
                    index,
                    found: other.kind().to_string(),
                }),
                None => Err(TransformError::InvalidExportEntry {
                    index,
                    found: "array hole".to_string(),
                }),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ExportCapture { names })
    }
}

/// `this.NAME = VALUE;`
#[derive(Debug, Clone, PartialEq)]
pub struct SelfExportAssignment {
    pub name: String,
    pub value: Expression,
}

impl SelfExportAssignment {
    /// Match a plain `=` assignment to a non-computed `this` property
    pub fn match_statement(statement: &Statement) -> Option<(&str, &Expression)> {
        let Some(Expression::Assignment(assign)) = statement.as_expression() else {
            return None;
        };
        if assign.operator != "=" {
            return None;
        }
        let Expression::Member(target) = assign.left.as_ref() else {
            return None;
        };
        if !target.object.is_this() {
            return None;
        }
        Some((target.property_name()?, assign.right.as_ref()))
    }

    /// `this.NAME = NAME`, where the local binding already exists
    pub fn is_redundant(&self) -> bool {
        self.value.as_identifier() == Some(self.name.as_str())
    }

    /// `var NAME = VALUE;`
    pub fn to_declaration(&self) -> Statement {
        Statement::declare(
            VariableKind::Var,
            Pattern::identifier(self.name.as_str()),
            self.value.clone(),
        )
    }
}

/// Result of the export rewrite pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportOutcome {
    /// Capture statements (or declarators) removed
    pub captures_removed: usize,
    /// Self exports turned into `var` declarations
    pub converted: Vec<String>,
    /// Self exports dropped as redundant
    pub dropped: Vec<String>,
}

fn is_capture_declarator(declarator: &VariableDeclarator) -> bool {
    declarator.init.is_some() && declarator.id.as_identifier() == Some(MANIFEST_SYMBOL)
}

/// Manifest arrays assigned by one statement
fn capture_values(statement: &Statement) -> Vec<&Expression> {
    if let Some((name, value)) = SelfExportAssignment::match_statement(statement) {
        return if name == MANIFEST_SYMBOL {
            vec![value]
        } else {
            Vec::new()
        };
    }

    match statement {
        Statement::VariableDeclaration(decl) => decl
            .declarations
            .iter()
            .filter(|declarator| is_capture_declarator(declarator))
            .filter_map(|declarator| declarator.init.as_ref())
            .collect(),
        _ => Vec::new(),
    }
}

/// Export rewriter
pub struct ExportRewriter;

impl ExportRewriter {
    pub fn new() -> Self {
        Self
    }

    /// Read the export manifest without touching the program
    ///
    /// When several capture statements exist the last one wins; earlier
    /// ones are still validated.
    pub fn collect_manifest(&self, body: &[Statement]) -> Result<ExportManifest> {
        let mut manifest = ExportManifest::default();
        let mut captures = 0;

        for value in body.iter().flat_map(capture_values) {
            let capture = ExportCapture::parse(value)?;
            captures += 1;
            manifest = ExportManifest::new(capture.names);
        }

        if captures > 1 {
            warn!(captures, "multiple {} manifests, keeping the last one", MANIFEST_SYMBOL);
        }
        Ok(manifest)
    }

    /// Remove capture statements and rewrite self exports
    pub fn rewrite(&self, body: &mut Vec<Statement>) -> ExportOutcome {
        let mut outcome = ExportOutcome::default();

        apply_edits(body, |statement| {
            if let Some((name, value)) = SelfExportAssignment::match_statement(statement) {
                if name == MANIFEST_SYMBOL {
                    outcome.captures_removed += 1;
                    return Edit::Remove;
                }

                let assignment = SelfExportAssignment {
                    name: name.to_string(),
                    value: value.clone(),
                };
                if assignment.is_redundant() {
                    debug!(name = %assignment.name, "dropped redundant self export");
                    outcome.dropped.push(assignment.name);
                    return Edit::Remove;
                }
                debug!(name = %assignment.name, "converted self export to declaration");
                let declaration = assignment.to_declaration();
                outcome.converted.push(assignment.name);
                return Edit::Replace(declaration);
            }

            if let Statement::VariableDeclaration(decl) = statement {
                let before = decl.declarations.len();
                decl.declarations
                    .retain(|declarator| !is_capture_declarator(declarator));
                let removed = before - decl.declarations.len();
                outcome.captures_removed += removed;
                if removed > 0 && decl.declarations.is_empty() {
                    return Edit::Remove;
                }
            }

            Edit::Keep
        });

        outcome
    }
}

impl Default for ExportRewriter {
    fn default() -> Self {
        Self::new()
    }
}
