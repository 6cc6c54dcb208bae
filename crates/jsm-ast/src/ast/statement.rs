//! Top-level statement nodes

use super::expression::Expression;
use super::node::{attach_comments, decode, node_type, take_comments, NodeFields};
use super::pattern::Pattern;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Statement node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Statement {
    /// `var`/`let`/`const` declaration
    VariableDeclaration(VariableDeclaration),

    /// Expression evaluated for its effect
    Expression(ExpressionStatement),

    /// Functions, classes, control flow and everything else
    Other(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct VariableDeclaration {
    pub kind: VariableKind,
    pub declarations: Vec<VariableDeclarator>,

    #[serde(flatten)]
    pub rest: NodeFields,
}

/// Declaration keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct VariableDeclarator {
    pub id: Pattern,
    #[serde(default)]
    pub init: Option<Expression>,

    #[serde(flatten)]
    pub rest: NodeFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct ExpressionStatement {
    pub expression: Expression,

    #[serde(flatten)]
    pub rest: NodeFields,
}

impl<'de> Deserialize<'de> for Statement {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let statement = match node_type(&value).as_str() {
            "VariableDeclaration" => Statement::VariableDeclaration(decode(value)?),
            "ExpressionStatement" => Statement::Expression(decode(value)?),
            _ => Statement::Other(value),
        };
        Ok(statement)
    }
}

impl Statement {
    /// Create a single-declarator declaration (`kind id = init`)
    pub fn declare(kind: VariableKind, id: Pattern, init: Expression) -> Self {
        Statement::VariableDeclaration(VariableDeclaration {
            kind,
            declarations: vec![VariableDeclarator {
                id,
                init: Some(init),
                rest: NodeFields::default(),
            }],
            rest: NodeFields::default(),
        })
    }

    /// Create an expression statement
    pub fn expression(expression: Expression) -> Self {
        Statement::Expression(ExpressionStatement {
            expression,
            rest: NodeFields::default(),
        })
    }

    /// Declaration behind this statement, if any
    pub fn as_declaration(&self) -> Option<&VariableDeclaration> {
        match self {
            Statement::VariableDeclaration(decl) => Some(decl),
            _ => None,
        }
    }

    /// Expression of an expression statement
    pub fn as_expression(&self) -> Option<&Expression> {
        match self {
            Statement::Expression(stmt) => Some(&stmt.expression),
            _ => None,
        }
    }

    /// Detach the comments attached to this statement
    pub fn take_comments(&mut self) -> NodeFields {
        self.fields_mut()
            .map(take_comments)
            .unwrap_or_default()
    }

    /// Attach comments taken from another statement
    ///
    /// Leading comments are placed before the statement's own.
    pub fn attach_comments(&mut self, comments: NodeFields) {
        if comments.is_empty() {
            return;
        }
        if let Some(fields) = self.fields_mut() {
            attach_comments(fields, comments);
        }
    }

    fn fields_mut(&mut self) -> Option<&mut Map<String, Value>> {
        match self {
            Statement::VariableDeclaration(decl) => Some(decl.rest.as_map_mut()),
            Statement::Expression(stmt) => Some(stmt.rest.as_map_mut()),
            Statement::Other(value) => value.as_object_mut(),
        }
    }
}

impl VariableDeclaration {
    /// Declarators whose binding and initializer are both present
    pub fn initialized(&self) -> impl Iterator<Item = (&Pattern, &Expression)> {
        self.declarations
            .iter()
            .filter_map(|decl| decl.init.as_ref().map(|init| (&decl.id, init)))
    }
}
