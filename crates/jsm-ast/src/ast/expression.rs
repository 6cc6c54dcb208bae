//! Expression nodes
//!
//! Only the expression kinds that the rewrite rules inspect or descend
//! through are typed. Everything else (functions, numbers, templates, ...)
//! is kept as [`Expression::Other`] and written back exactly as it was read.

use super::node::{decode, node_type, NodeFields};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Expression node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Expression {
    /// Bare reference (e.g., `Components`)
    Identifier(Identifier),

    /// String literal (e.g., `'resource://foo.jsm'`)
    StringLiteral(StringLiteral),

    /// `this`
    This(ThisExpression),

    /// Property access (e.g., `Components.utils`, `obj[key]`)
    Member(MemberExpression),

    /// Call (e.g., `Cu.import(path, {})`)
    Call(CallExpression),

    /// Array literal
    Array(ArrayExpression),

    /// Object literal
    Object(ObjectExpression),

    /// Assignment (e.g., `this.foo = bar`)
    Assignment(AssignmentExpression),

    /// `test ? consequent : alternate`
    Conditional(ConditionalExpression),

    /// `a && b`, `a || b`, `a ?? b`
    Logical(LogicalExpression),

    /// Arithmetic, comparison and other binary operators
    Binary(BinaryExpression),

    /// Comma-separated expressions
    Sequence(SequenceExpression),

    /// Any node kind the rewrite never looks into
    Other(Value),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct Identifier {
    pub name: String,

    #[serde(flatten)]
    pub rest: NodeFields,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct StringLiteral {
    pub value: String,

    #[serde(flatten)]
    pub rest: NodeFields,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct ThisExpression {
    #[serde(flatten)]
    pub rest: NodeFields,
}

/// Property access
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct MemberExpression {
    pub object: Box<Expression>,
    pub property: Box<Expression>,
    /// `true` for `object[property]`
    #[serde(default)]
    pub computed: bool,

    #[serde(flatten)]
    pub rest: NodeFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct CallExpression {
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,

    #[serde(flatten)]
    pub rest: NodeFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct ArrayExpression {
    /// `None` marks a hole (`[a, , b]`)
    pub elements: Vec<Option<Expression>>,

    #[serde(flatten)]
    pub rest: NodeFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct ObjectExpression {
    pub properties: Vec<ObjectMember>,

    #[serde(flatten)]
    pub rest: NodeFields,
}

/// Entry of an object literal
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ObjectMember {
    Property(ObjectProperty),
    /// Methods and spreads
    Other(Value),
}

/// `key: value` entry of an object literal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct ObjectProperty {
    pub key: Expression,
    pub value: Expression,
    #[serde(default)]
    pub computed: bool,
    #[serde(default)]
    pub shorthand: bool,

    #[serde(flatten)]
    pub rest: NodeFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct AssignmentExpression {
    pub operator: String,
    pub left: Box<Expression>,
    pub right: Box<Expression>,

    #[serde(flatten)]
    pub rest: NodeFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct ConditionalExpression {
    pub test: Box<Expression>,
    pub consequent: Box<Expression>,
    pub alternate: Box<Expression>,

    #[serde(flatten)]
    pub rest: NodeFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct LogicalExpression {
    pub operator: String,
    pub left: Box<Expression>,
    pub right: Box<Expression>,

    #[serde(flatten)]
    pub rest: NodeFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct BinaryExpression {
    pub operator: String,
    pub left: Box<Expression>,
    pub right: Box<Expression>,

    #[serde(flatten)]
    pub rest: NodeFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct SequenceExpression {
    pub expressions: Vec<Expression>,

    #[serde(flatten)]
    pub rest: NodeFields,
}

impl<'de> Deserialize<'de> for Expression {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let expr = match node_type(&value).as_str() {
            "Identifier" => Expression::Identifier(decode(value)?),
            "StringLiteral" => Expression::StringLiteral(decode(value)?),
            "ThisExpression" => Expression::This(decode(value)?),
            "MemberExpression" => Expression::Member(decode(value)?),
            "CallExpression" => Expression::Call(decode(value)?),
            "ArrayExpression" => Expression::Array(decode(value)?),
            "ObjectExpression" => Expression::Object(decode(value)?),
            "AssignmentExpression" => Expression::Assignment(decode(value)?),
            "ConditionalExpression" => Expression::Conditional(decode(value)?),
            "LogicalExpression" => Expression::Logical(decode(value)?),
            "BinaryExpression" => Expression::Binary(decode(value)?),
            "SequenceExpression" => Expression::Sequence(decode(value)?),
            _ => Expression::Other(value),
        };
        Ok(expr)
    }
}

impl<'de> Deserialize<'de> for ObjectMember {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match node_type(&value).as_str() {
            "ObjectProperty" => Ok(ObjectMember::Property(decode(value)?)),
            _ => Ok(ObjectMember::Other(value)),
        }
    }
}

impl Expression {
    /// Create an identifier reference
    pub fn identifier(name: impl Into<String>) -> Self {
        Expression::Identifier(Identifier {
            name: name.into(),
            rest: NodeFields::default(),
        })
    }

    /// Create a string literal
    pub fn string(value: impl Into<String>) -> Self {
        Expression::StringLiteral(StringLiteral {
            value: value.into(),
            rest: NodeFields::default(),
        })
    }

    /// Create a `this` expression
    pub fn this() -> Self {
        Expression::This(ThisExpression::default())
    }

    /// Create a non-computed property access (`object.property`)
    pub fn member(object: Expression, property: impl Into<String>) -> Self {
        Expression::Member(MemberExpression {
            object: Box::new(object),
            property: Box::new(Expression::identifier(property)),
            computed: false,
            rest: NodeFields::default(),
        })
    }

    /// Create a call expression
    pub fn call(callee: Expression, arguments: Vec<Expression>) -> Self {
        Expression::Call(CallExpression {
            callee: Box::new(callee),
            arguments,
            rest: NodeFields::default(),
        })
    }

    /// Create an array literal without holes
    pub fn array(elements: Vec<Expression>) -> Self {
        Expression::Array(ArrayExpression {
            elements: elements.into_iter().map(Some).collect(),
            rest: NodeFields::default(),
        })
    }

    /// Create an object literal
    pub fn object(properties: Vec<ObjectProperty>) -> Self {
        Expression::Object(ObjectExpression {
            properties: properties.into_iter().map(ObjectMember::Property).collect(),
            rest: NodeFields::default(),
        })
    }

    /// Create a plain `=` assignment
    pub fn assign(left: Expression, right: Expression) -> Self {
        Expression::Assignment(AssignmentExpression {
            operator: "=".to_string(),
            left: Box::new(left),
            right: Box::new(right),
            rest: NodeFields::default(),
        })
    }

    /// Name of a bare identifier reference
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Expression::Identifier(ident) => Some(&ident.name),
            _ => None,
        }
    }

    /// Value of a string literal
    pub fn as_string_literal(&self) -> Option<&str> {
        match self {
            Expression::StringLiteral(literal) => Some(&literal.value),
            _ => None,
        }
    }

    pub fn is_this(&self) -> bool {
        matches!(self, Expression::This(_))
    }

    /// Babel node type of this expression
    pub fn kind(&self) -> &str {
        match self {
            Expression::Identifier(_) => "Identifier",
            Expression::StringLiteral(_) => "StringLiteral",
            Expression::This(_) => "ThisExpression",
            Expression::Member(_) => "MemberExpression",
            Expression::Call(_) => "CallExpression",
            Expression::Array(_) => "ArrayExpression",
            Expression::Object(_) => "ObjectExpression",
            Expression::Assignment(_) => "AssignmentExpression",
            Expression::Conditional(_) => "ConditionalExpression",
            Expression::Logical(_) => "LogicalExpression",
            Expression::Binary(_) => "BinaryExpression",
            Expression::Sequence(_) => "SequenceExpression",
            Expression::Other(value) => value
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or("unknown"),
        }
    }

    /// Direct sub-expressions, in source order
    ///
    /// Opaque nodes have no children. Non-computed property names and
    /// object keys are names rather than expressions and are not returned.
    pub fn children_mut(&mut self) -> Vec<&mut Expression> {
        match self {
            Expression::Member(member) => {
                let mut children = vec![member.object.as_mut()];
                if member.computed {
                    children.push(member.property.as_mut());
                }
                children
            }
            Expression::Call(call) => std::iter::once(call.callee.as_mut())
                .chain(call.arguments.iter_mut())
                .collect(),
            Expression::Array(array) => array.elements.iter_mut().flatten().collect(),
            Expression::Object(object) => object
                .properties
                .iter_mut()
                .filter_map(|member| match member {
                    ObjectMember::Property(property) => Some(&mut property.value),
                    ObjectMember::Other(_) => None,
                })
                .collect(),
            Expression::Assignment(assign) => vec![assign.left.as_mut(), assign.right.as_mut()],
            Expression::Conditional(cond) => vec![
                cond.test.as_mut(),
                cond.consequent.as_mut(),
                cond.alternate.as_mut(),
            ],
            Expression::Logical(logical) => vec![logical.left.as_mut(), logical.right.as_mut()],
            Expression::Binary(binary) => vec![binary.left.as_mut(), binary.right.as_mut()],
            Expression::Sequence(seq) => seq.expressions.iter_mut().collect(),
            Expression::Identifier(_)
            | Expression::StringLiteral(_)
            | Expression::This(_)
            | Expression::Other(_) => Vec::new(),
        }
    }
}

impl MemberExpression {
    /// Property name for `object.name` accesses; `None` when computed
    pub fn property_name(&self) -> Option<&str> {
        if self.computed {
            return None;
        }
        self.property.as_identifier()
    }

    /// Name of the receiver when it is a bare identifier
    pub fn object_name(&self) -> Option<&str> {
        self.object.as_identifier()
    }
}

impl ObjectProperty {
    /// Create a shorthand `{ name }` entry
    pub fn shorthand(name: impl Into<String>) -> Self {
        let name = name.into();
        ObjectProperty {
            key: Expression::identifier(name.clone()),
            value: Expression::identifier(name),
            computed: false,
            shorthand: true,
            rest: NodeFields::default(),
        }
    }
}
