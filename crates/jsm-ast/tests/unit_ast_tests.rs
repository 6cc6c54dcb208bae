//! Unit tests for the program tree
//!
//! Checks that Babel-shaped JSON survives a read/write cycle and that the
//! typed view exposes the shapes the rewrite relies on.

use jsm_ast::ast::*;
use jsm_ast::{AstError, Program};
use serde_json::json;

// =============================================================================
// Round trips
// =============================================================================

#[test]
fn test_jsm_module_round_trip() -> anyhow::Result<()> {
    // const {utils: Cu} = Components;
    // this.EXPORTED_SYMBOLS = ["a", "b"];
    // class A {}
    let source = json!({
        "type": "Program",
        "sourceType": "script",
        "directives": [],
        "body": [
            {
                "type": "VariableDeclaration",
                "kind": "const",
                "declarations": [{
                    "type": "VariableDeclarator",
                    "id": {
                        "type": "ObjectPattern",
                        "properties": [{
                            "type": "ObjectProperty",
                            "key": { "type": "Identifier", "name": "utils" },
                            "value": { "type": "Identifier", "name": "Cu" },
                            "computed": false,
                            "shorthand": false
                        }]
                    },
                    "init": { "type": "Identifier", "name": "Components" }
                }]
            },
            {
                "type": "ExpressionStatement",
                "expression": {
                    "type": "AssignmentExpression",
                    "operator": "=",
                    "left": {
                        "type": "MemberExpression",
                        "object": { "type": "ThisExpression" },
                        "property": { "type": "Identifier", "name": "EXPORTED_SYMBOLS" },
                        "computed": false
                    },
                    "right": {
                        "type": "ArrayExpression",
                        "elements": [
                            { "type": "StringLiteral", "value": "a" },
                            { "type": "StringLiteral", "value": "b" }
                        ]
                    }
                }
            },
            {
                "type": "ClassDeclaration",
                "id": { "type": "Identifier", "name": "A" },
                "superClass": null,
                "body": { "type": "ClassBody", "body": [] }
            }
        ]
    });

    let program = Program::from_json(&source.to_string())?;
    assert_eq!(program.len(), 3);
    assert!(matches!(program.body[0], Statement::VariableDeclaration(_)));
    assert!(matches!(program.body[1], Statement::Expression(_)));
    assert!(matches!(program.body[2], Statement::Other(_)));

    let written: serde_json::Value = serde_json::from_str(&program.to_json()?)?;
    assert_eq!(written, source);
    Ok(())
}

#[test]
fn test_pretty_output_parses_back() -> anyhow::Result<()> {
    let program = Program::new(vec![Statement::expression(Expression::identifier("a"))]);

    let pretty = program.to_json_pretty()?;
    assert!(pretty.contains('\n'));
    assert_eq!(Program::from_json(&pretty)?, program);
    Ok(())
}

// =============================================================================
// Typed view
// =============================================================================

#[test]
fn test_this_assignment_shape() {
    let statement = Statement::expression(Expression::assign(
        Expression::member(Expression::this(), "foo"),
        Expression::identifier("foo"),
    ));

    match statement.as_expression() {
        Some(Expression::Assignment(assign)) => {
            assert_eq!(assign.operator, "=");
            match assign.left.as_ref() {
                Expression::Member(member) => {
                    assert!(member.object.is_this());
                    assert_eq!(member.property_name(), Some("foo"));
                }
                _ => panic!("Expected Member expression"),
            }
        }
        _ => panic!("Expected Assignment expression"),
    }
}

#[test]
fn test_nested_expressions_are_typed() {
    let value = json!({
        "type": "ConditionalExpression",
        "test": { "type": "Identifier", "name": "flag" },
        "consequent": {
            "type": "CallExpression",
            "callee": { "type": "Identifier", "name": "f" },
            "arguments": []
        },
        "alternate": {
            "type": "LogicalExpression",
            "operator": "||",
            "left": { "type": "Identifier", "name": "a" },
            "right": {
                "type": "SequenceExpression",
                "expressions": [{ "type": "Identifier", "name": "b" }]
            }
        }
    });

    let mut expr: Expression = serde_json::from_value(value).unwrap();
    let kinds: Vec<String> = expr
        .children_mut()
        .into_iter()
        .map(|child| child.kind().to_string())
        .collect();
    assert_eq!(kinds, vec!["Identifier", "CallExpression", "LogicalExpression"]);
}

#[test]
fn test_object_expression_with_spread() {
    let value = json!({
        "type": "ObjectExpression",
        "properties": [
            {
                "type": "ObjectProperty",
                "key": { "type": "Identifier", "name": "a" },
                "value": { "type": "Identifier", "name": "a" },
                "computed": false,
                "shorthand": true
            },
            { "type": "SpreadElement", "argument": { "type": "Identifier", "name": "rest" } }
        ]
    });

    let mut expr: Expression = serde_json::from_value(value.clone()).unwrap();
    match &expr {
        Expression::Object(object) => {
            assert!(matches!(object.properties[0], ObjectMember::Property(_)));
            assert!(matches!(object.properties[1], ObjectMember::Other(_)));
        }
        _ => panic!("Expected Object expression"),
    }
    assert_eq!(expr.children_mut().len(), 1);
    assert_eq!(serde_json::to_value(&expr).unwrap(), value);
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_unknown_declaration_kind_is_rejected() {
    let source = json!({
        "type": "Program",
        "body": [{
            "type": "VariableDeclaration",
            "kind": "constant",
            "declarations": []
        }]
    });

    let err = Program::from_json(&source.to_string()).unwrap_err();
    assert!(matches!(err, AstError::Json(_)));
}

#[test]
fn test_untyped_root_is_rejected() {
    let err = Program::from_json("{}").unwrap_err();
    assert!(matches!(err, AstError::UnexpectedRoot(ref kind) if kind == "<untyped>"));
}
