//! Program tree definitions
//!
//! This module contains the node definitions for:
//! - The program root
//! - Top-level statements
//! - Expressions
//! - Binding patterns

pub mod expression;
mod node;
pub mod pattern;
pub mod program;
pub mod statement;

pub use expression::{
    ArrayExpression, AssignmentExpression, BinaryExpression, CallExpression,
    ConditionalExpression, Expression, Identifier, LogicalExpression, MemberExpression,
    ObjectExpression, ObjectMember, ObjectProperty, SequenceExpression, StringLiteral,
    ThisExpression,
};
pub use node::{NodeFields, COMMENT_KEYS};
pub use pattern::{AssignmentProperty, ObjectPattern, Pattern, PatternProperty};
pub use program::Program;
pub use statement::{
    ExpressionStatement, Statement, VariableDeclaration, VariableDeclarator, VariableKind,
};
