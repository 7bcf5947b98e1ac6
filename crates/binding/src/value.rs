//! Dynamic attribute values.
//!
//! The attribute tree stores one of five shapes:
//! - string
//! - integer (i64)
//! - boolean
//! - list (ordered, used for repeated blocks)
//! - map (sorted by key, used for blocks and free-form key/value collections)
//!
//! There is no null: an attribute without a value is simply absent from the
//! tree.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A map of attribute keys to values.
pub type Map = BTreeMap<String, Value>;

/// All possible attribute value shapes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    String(String),
    List(Vec<Value>),
    Map(Map),
}

impl Value {
    /// Short type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// Whether this is the zero value of its shape.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Bool(b) => !b,
            Value::Int(i) => *i == 0,
            Value::String(s) => s.is_empty(),
            Value::List(l) => l.is_empty(),
            Value::Map(m) => m.is_empty(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Map(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::List(value.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_values() {
        assert!(Value::from(false).is_zero());
        assert!(Value::Int(0).is_zero());
        assert!(Value::from("").is_zero());
        assert!(Value::List(vec![]).is_zero());
        assert!(Value::Map(Map::new()).is_zero());

        assert!(!Value::from(true).is_zero());
        assert!(!Value::Int(-1).is_zero());
        assert!(!Value::from("x").is_zero());
    }

    #[test]
    fn test_json_shapes() {
        let value: Value = serde_json::from_str(
            r#"{"name": "prod", "count": 3, "locked": true, "keys": [{"id": "k1"}]}"#,
        )
        .unwrap();

        let map = value.as_map().unwrap();
        assert_eq!(map["name"], Value::from("prod"));
        assert_eq!(map["count"], Value::Int(3));
        assert_eq!(map["locked"], Value::Bool(true));
        let keys = map["keys"].as_list().unwrap();
        assert_eq!(keys[0].as_map().unwrap()["id"].as_str(), Some("k1"));
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Int(1).type_name(), "int");
        assert_eq!(Value::from(vec!["a"]).type_name(), "list");
    }
}
