//! Binding patterns (left-hand side of declarators)

use super::expression::{Expression, Identifier};
use super::node::{decode, node_type, NodeFields};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Binding pattern
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Pattern {
    /// Single name binding (`const Cu = ...`)
    Identifier(Identifier),

    /// Object destructuring (`const {utils: Cu} = ...`)
    Object(ObjectPattern),

    /// Array destructuring, defaults and other binding forms
    Other(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct ObjectPattern {
    pub properties: Vec<PatternProperty>,

    #[serde(flatten)]
    pub rest: NodeFields,
}

/// Entry of an object destructuring pattern
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PatternProperty {
    Property(AssignmentProperty),
    /// Rest elements (`...rest`)
    Other(Value),
}

/// `key: value` entry of an object pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "ObjectProperty")]
pub struct AssignmentProperty {
    pub key: Expression,
    pub value: Pattern,
    #[serde(default)]
    pub computed: bool,
    #[serde(default)]
    pub shorthand: bool,

    #[serde(flatten)]
    pub rest: NodeFields,
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let pattern = match node_type(&value).as_str() {
            "Identifier" => Pattern::Identifier(decode(value)?),
            "ObjectPattern" => Pattern::Object(decode(value)?),
            _ => Pattern::Other(value),
        };
        Ok(pattern)
    }
}

impl<'de> Deserialize<'de> for PatternProperty {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match node_type(&value).as_str() {
            "ObjectProperty" => Ok(PatternProperty::Property(decode(value)?)),
            _ => Ok(PatternProperty::Other(value)),
        }
    }
}

impl Pattern {
    /// Create a single name binding
    pub fn identifier(name: impl Into<String>) -> Self {
        Pattern::Identifier(Identifier {
            name: name.into(),
            rest: NodeFields::default(),
        })
    }

    /// Create an object pattern of shorthand entries (`{a, b}`)
    pub fn shorthand_object<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Pattern::Object(ObjectPattern {
            properties: names
                .into_iter()
                .map(|name| PatternProperty::Property(AssignmentProperty::shorthand(name)))
                .collect(),
            rest: NodeFields::default(),
        })
    }

    /// Create an object pattern from `(key, local)` pairs (`{key: local}`)
    pub fn renamed_object<I, K, L>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, L)>,
        K: Into<String>,
        L: Into<String>,
    {
        Pattern::Object(ObjectPattern {
            properties: entries
                .into_iter()
                .map(|(key, local)| {
                    let key = key.into();
                    let local = local.into();
                    PatternProperty::Property(AssignmentProperty {
                        shorthand: key == local,
                        key: Expression::identifier(key),
                        value: Pattern::identifier(local),
                        computed: false,
                        rest: NodeFields::default(),
                    })
                })
                .collect(),
            rest: NodeFields::default(),
        })
    }

    /// Bound name of a single name binding
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Pattern::Identifier(ident) => Some(&ident.name),
            _ => None,
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Pattern::Object(_))
    }
}

impl AssignmentProperty {
    /// Create a shorthand `{ name }` entry
    pub fn shorthand(name: impl Into<String>) -> Self {
        let name = name.into();
        AssignmentProperty {
            key: Expression::identifier(name.clone()),
            value: Pattern::identifier(name),
            computed: false,
            shorthand: true,
            rest: NodeFields::default(),
        }
    }

    /// Key name for `{name: ...}` and `{'name': ...}` entries
    pub fn key_name(&self) -> Option<&str> {
        if self.computed {
            return None;
        }
        self.key
            .as_identifier()
            .or_else(|| self.key.as_string_literal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_renamed_object_pattern() {
        // {utils: Cu}
        let pattern = Pattern::renamed_object([("utils", "Cu")]);

        match pattern {
            Pattern::Object(object) => {
                assert_eq!(object.properties.len(), 1);
                match &object.properties[0] {
                    PatternProperty::Property(property) => {
                        assert_eq!(property.key_name(), Some("utils"));
                        assert_eq!(property.value.as_identifier(), Some("Cu"));
                        assert!(!property.shorthand);
                    }
                    PatternProperty::Other(_) => panic!("Expected property"),
                }
            }
            _ => panic!("Expected Object pattern"),
        }
    }

    #[test]
    fn test_deserialize_object_pattern_with_rest() {
        let value = json!({
            "type": "ObjectPattern",
            "properties": [
                {
                    "type": "ObjectProperty",
                    "key": { "type": "Identifier", "name": "utils" },
                    "value": { "type": "Identifier", "name": "utils" },
                    "computed": false,
                    "shorthand": true
                },
                {
                    "type": "RestElement",
                    "argument": { "type": "Identifier", "name": "rest" }
                }
            ]
        });

        let pattern: Pattern = serde_json::from_value(value.clone()).unwrap();
        match &pattern {
            Pattern::Object(object) => {
                assert!(matches!(object.properties[0], PatternProperty::Property(_)));
                assert!(matches!(object.properties[1], PatternProperty::Other(_)));
            }
            _ => panic!("Expected Object pattern"),
        }
        assert_eq!(serde_json::to_value(&pattern).unwrap(), value);
    }

    #[test]
    fn test_string_key_name() {
        let property = AssignmentProperty {
            key: Expression::string("utils"),
            value: Pattern::identifier("Cu"),
            computed: false,
            shorthand: false,
            rest: NodeFields::default(),
        };
        assert_eq!(property.key_name(), Some("utils"));
    }

    #[test]
    fn test_array_pattern_is_opaque() {
        let value = json!({ "type": "ArrayPattern", "elements": [] });
        let pattern: Pattern = serde_json::from_value(value).unwrap();
        assert!(matches!(pattern, Pattern::Other(_)));
        assert!(!pattern.is_object());
        assert_eq!(pattern.as_identifier(), None);
    }
}
