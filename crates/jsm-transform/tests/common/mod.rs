//! Common helpers for building JSM-shaped programs in tests

#![allow(dead_code)]

use jsm_ast::ast::{Expression, Pattern, Statement, VariableKind};
use jsm_ast::Program;

pub fn ident(name: &str) -> Expression {
    Expression::identifier(name)
}

pub fn string(value: &str) -> Expression {
    Expression::string(value)
}

/// `const name = init;`
pub fn const_decl(name: &str, init: Expression) -> Statement {
    Statement::declare(VariableKind::Const, Pattern::identifier(name), init)
}

/// `var name = init;`
pub fn var_decl(name: &str, init: Expression) -> Statement {
    Statement::declare(VariableKind::Var, Pattern::identifier(name), init)
}

/// `const {a, b} = init;`
pub fn const_destructure(names: &[&str], init: Expression) -> Statement {
    Statement::declare(
        VariableKind::Const,
        Pattern::shorthand_object(names.iter().copied()),
        init,
    )
}

/// `var {a} = init;`
pub fn var_destructure(names: &[&str], init: Expression) -> Statement {
    Statement::declare(
        VariableKind::Var,
        Pattern::shorthand_object(names.iter().copied()),
        init,
    )
}

/// `receiver.import(path, {})`
pub fn import_call(receiver: Expression, path: &str) -> Expression {
    Expression::call(
        Expression::member(receiver, "import"),
        vec![string(path), Expression::object(vec![])],
    )
}

/// `Components.utils`
pub fn components_utils() -> Expression {
    Expression::member(ident("Components"), "utils")
}

/// `require(path)`
pub fn require(path: &str) -> Expression {
    Expression::call(ident("require"), vec![string(path)])
}

/// `this.name = value;`
pub fn this_assign(name: &str, value: Expression) -> Statement {
    Statement::expression(Expression::assign(
        Expression::member(Expression::this(), name),
        value,
    ))
}

/// `this.EXPORTED_SYMBOLS = [...];`
pub fn exported_symbols(names: &[&str]) -> Statement {
    this_assign(
        "EXPORTED_SYMBOLS",
        Expression::array(names.iter().map(|name| string(name)).collect()),
    )
}

/// `module.exports = {a, b};`
pub fn module_exports(names: &[&str]) -> Statement {
    Statement::expression(Expression::assign(
        Expression::member(ident("module"), "exports"),
        Expression::object(
            names
                .iter()
                .map(|name| jsm_ast::ast::ObjectProperty::shorthand(*name))
                .collect(),
        ),
    ))
}

/// `host.method(this, name, path);`
pub fn lazy_getter(host: &str, method: &str, name: &str, path: &str) -> Statement {
    Statement::expression(Expression::call(
        Expression::member(ident(host), method),
        vec![Expression::this(), string(name), string(path)],
    ))
}

/// Opaque numeric literal, as a parser would produce it
pub fn number(value: u32) -> Expression {
    Expression::Other(serde_json::json!({ "type": "NumericLiteral", "value": value }))
}

pub fn program(body: Vec<Statement>) -> Program {
    Program::new(body)
}
