//! Program root

use super::node::{node_type, NodeFields};
use super::statement::Statement;
use crate::error::{AstError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Program root: the ordered list of top-level statements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct Program {
    /// `script` or `module`
    #[serde(rename = "sourceType", default = "default_source_type")]
    pub source_type: String,

    /// Prologue directives (`"use strict"`), kept verbatim
    #[serde(default)]
    pub directives: Vec<Value>,

    pub body: Vec<Statement>,

    #[serde(flatten)]
    pub rest: NodeFields,

    /// Remaining fields of the enclosing Babel `File` node (`comments`,
    /// `tokens`, positions), when the tree was read from one
    #[serde(skip)]
    pub file: Option<NodeFields>,
}

fn default_source_type() -> String {
    "script".to_string()
}

impl Program {
    /// Create a script program from its top-level statements
    pub fn new(body: Vec<Statement>) -> Self {
        Program {
            source_type: default_source_type(),
            directives: Vec::new(),
            body,
            rest: NodeFields::default(),
            file: None,
        }
    }

    /// Parse a serialized tree
    ///
    /// Accepts either a `Program` node or a Babel `File` node wrapping one.
    pub fn from_json(source: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(source)?;
        Self::from_value(value)
    }

    /// Convert a deserialized JSON tree
    pub fn from_value(value: Value) -> Result<Self> {
        match node_type(&value).as_str() {
            "File" => {
                let mut file = match value {
                    Value::Object(map) => map,
                    _ => Map::new(),
                };
                let inner = file.remove("program").unwrap_or(Value::Null);
                let mut program = Self::from_value(inner)?;
                program.file = Some(NodeFields::from_map(file));
                Ok(program)
            }
            "Program" => Ok(serde_json::from_value(value)?),
            "" => Err(AstError::UnexpectedRoot("<untyped>".to_string())),
            other => Err(AstError::UnexpectedRoot(other.to_string())),
        }
    }

    /// Convert back to a JSON tree
    ///
    /// A tree read from a `File` node is wrapped in it again.
    pub fn to_value(&self) -> Result<Value> {
        let program = serde_json::to_value(self)?;
        let Some(file) = &self.file else {
            return Ok(program);
        };

        let mut wrapper = Map::new();
        wrapper.insert("type".to_string(), Value::from("File"));
        wrapper.extend(file.clone().into_map());
        wrapper.insert("program".to_string(), program);
        Ok(Value::Object(wrapper))
    }

    /// Serialize the tree as compact JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_value()?)?)
    }

    /// Serialize the tree as indented JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_value()?)?)
    }

    /// Number of top-level statements
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
