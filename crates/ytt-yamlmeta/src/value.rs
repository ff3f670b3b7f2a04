//! Values held by documents, map items and array items.

use crate::node::{Array, Map};
use serde::Serialize;
use std::fmt;

/// The value of a document, map item or array item.
///
/// Containers are nodes in their own right (they carry a position and
/// annotations); scalars are plain values and take their position from the
/// item that holds them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Map(Map),
    Array(Array),
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

/// Coarse classification of a value, used in messages and dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Map,
    Array,
    String,
    Int,
    Float,
    Bool,
    Null,
}

impl ValueKind {
    /// Human-readable name of the kind.
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Map => "map",
            ValueKind::Array => "array",
            ValueKind::String => "string",
            ValueKind::Int => "integer",
            ValueKind::Float => "float",
            ValueKind::Bool => "boolean",
            ValueKind::Null => "null",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Map(_) => ValueKind::Map,
            Value::Array(_) => ValueKind::Array,
            Value::String(_) => ValueKind::String,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Bool(_) => ValueKind::Bool,
            Value::Null => ValueKind::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
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
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Map(map)
    }
}

impl From<Array> for Value {
    fn from(array: Array) -> Self {
        Value::Array(array)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// A map key.
///
/// Keys are scalars; floats are excluded so that keys can be compared for
/// equality, ordered and hashed. Keys of different kinds never compare equal,
/// even when they render the same (`1` and `"1"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum Key {
    String(String),
    Int(i64),
    Bool(bool),
    Null,
}

impl Key {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::String(s) => Some(s),
            _ => None,
        }
    }

    /// The key as a scalar value, e.g. for re-emitting it as data.
    pub fn to_value(&self) -> Value {
        match self {
            Key::String(s) => Value::String(s.clone()),
            Key::Int(n) => Value::Int(*n),
            Key::Bool(b) => Value::Bool(*b),
            Key::Null => Value::Null,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::String(s) => f.write_str(s),
            Key::Int(n) => write!(f, "{}", n),
            Key::Bool(b) => write!(f, "{}", b),
            Key::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::String(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::String(s)
    }
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Key::Int(n)
    }
}

impl From<bool> for Key {
    fn from(b: bool) -> Self {
        Key::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_kind_names() {
        assert_eq!(Value::from("x").kind().name(), "string");
        assert_eq!(Value::from(3_i64).kind().name(), "integer");
        assert_eq!(Value::from(1.5).kind().name(), "float");
        assert_eq!(Value::from(true).kind().name(), "boolean");
        assert_eq!(Value::Null.kind().name(), "null");
        assert_eq!(Value::from(Map::default()).kind(), ValueKind::Map);
        assert_eq!(Value::from(Array::default()).kind(), ValueKind::Array);
    }

    #[test]
    fn test_key_display() {
        assert_eq!(Key::from("name").to_string(), "name");
        assert_eq!(Key::from(42_i64).to_string(), "42");
        assert_eq!(Key::Null.to_string(), "null");
    }

    #[test]
    fn test_keys_of_different_kinds_are_distinct() {
        assert_ne!(Key::from(1_i64), Key::from("1"));
        assert_ne!(Key::from(true), Key::from("true"));
        assert_ne!(Key::Null, Key::from("null"));
        assert_eq!(Key::from(1_i64).to_string(), Key::from("1").to_string());
    }

    #[test]
    fn test_key_to_value() {
        assert_eq!(Key::from("a").to_value(), Value::from("a"));
        assert_eq!(Key::from(false).to_value(), Value::Bool(false));
    }
}
