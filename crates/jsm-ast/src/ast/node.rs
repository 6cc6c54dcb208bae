//! Shared helpers for `type`-tagged nodes

use serde::de::{DeserializeOwned, Error};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Keys under which a parser attaches comments to a node
pub const COMMENT_KEYS: [&str; 3] = ["leadingComments", "trailingComments", "innerComments"];

/// Node fields the typed view does not model
///
/// Positions (`start`, `end`, `loc`), attached comments, `extra` and any
/// parser-specific keys land here and are written back unchanged. The
/// `type` tag is owned by the node struct and never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeFields(Map<String, Value>);

impl NodeFields {
    /// Wrap a raw field map, dropping its `type` tag
    pub fn from_map(mut map: Map<String, Value>) -> Self {
        map.remove("type");
        NodeFields(map)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl Serialize for NodeFields {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NodeFields {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Map::deserialize(deserializer).map(NodeFields::from_map)
    }
}

/// Detach the comment arrays from a node's fields
pub(crate) fn take_comments(fields: &mut Map<String, Value>) -> NodeFields {
    let mut comments = NodeFields::default();
    for key in COMMENT_KEYS {
        if let Some(value) = fields.remove(key) {
            comments.insert(key, value);
        }
    }
    comments
}

/// Merge comment arrays into a node's fields
///
/// Incoming leading comments go before the node's own; trailing and inner
/// comments go after.
pub(crate) fn attach_comments(fields: &mut Map<String, Value>, comments: NodeFields) {
    for (key, incoming) in comments.into_map() {
        let Value::Array(mut incoming) = incoming else {
            continue;
        };
        let merged = match fields.remove(&key) {
            Some(Value::Array(existing)) if key == "leadingComments" => {
                incoming.extend(existing);
                incoming
            }
            Some(Value::Array(mut existing)) => {
                existing.extend(incoming);
                existing
            }
            _ => incoming,
        };
        if !merged.is_empty() {
            fields.insert(key, Value::Array(merged));
        }
    }
}

/// Read the `type` tag of a raw node
pub(crate) fn node_type(value: &Value) -> String {
    value
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Decode a raw node into one of the typed node structs
pub(crate) fn decode<T, E>(value: Value) -> Result<T, E>
where
    T: DeserializeOwned,
    E: Error,
{
    serde_json::from_value(value).map_err(E::custom)
}
