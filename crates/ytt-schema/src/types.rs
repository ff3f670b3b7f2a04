//! Schema type definitions
//!
//! A schema document is compiled into a tree of these types. The tree is
//! built once and never mutated afterwards, so it can be shared by any number
//! of checks.

use crate::annotations::SchemaAnnotations;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use ytt_yamlmeta::{Document, Key, Position, Value, ValueKind};

/// The declared type of a value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Type {
    Scalar(ScalarType),
    Map(MapType),
    Array(ArrayType),
}

/// Primitive kinds a scalar exemplar can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    String,
    Integer,
    Boolean,
}

impl ScalarKind {
    pub fn name(self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Integer => "integer",
            ScalarKind::Boolean => "boolean",
        }
    }

    /// Whether a data value of `kind` is an instance of this scalar kind
    pub fn accepts(self, kind: ValueKind) -> bool {
        matches!(
            (self, kind),
            (ScalarKind::String, ValueKind::String)
                | (ScalarKind::Integer, ValueKind::Int)
                | (ScalarKind::Boolean, ValueKind::Bool)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScalarType {
    pub kind: ScalarKind,
}

/// An ordered set of declared fields
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MapType {
    /// Fields in schema-document order
    pub items: Vec<MapItemType>,
    #[serde(skip_serializing_if = "SchemaAnnotations::is_empty")]
    pub annotations: SchemaAnnotations,
    #[serde(skip)]
    pub position: Position,
}

/// A single declared field of a map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapItemType {
    pub key: Key,
    pub value_type: Type,
    /// Value used when data omits this key; `Value::Null` means no default
    pub default_value: Value,
    #[serde(skip)]
    pub position: Position,
    #[serde(skip_serializing_if = "SchemaAnnotations::is_empty")]
    pub annotations: SchemaAnnotations,
}

/// A homogeneous sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayType {
    pub items_type: ArrayItemType,
    #[serde(skip_serializing_if = "SchemaAnnotations::is_empty")]
    pub annotations: SchemaAnnotations,
    #[serde(skip)]
    pub position: Position,
}

/// The type shared by every element of an array
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayItemType {
    pub value_type: Box<Type>,
    #[serde(skip)]
    pub position: Position,
}

/// The declared shape of a whole document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentType {
    /// Absent when the schema document's top-level value is a scalar or null
    pub value_type: Option<Type>,
    /// The schema document this type was built from
    #[serde(skip)]
    pub source: Arc<Document>,
}

impl Type {
    /// Name of the type as used in messages
    pub fn name(&self) -> &'static str {
        match self {
            Type::Scalar(scalar) => scalar.kind.name(),
            Type::Map(_) => "map",
            Type::Array(_) => "array",
        }
    }

    /// Whether an explicit null satisfies this type
    pub fn is_nullable(&self) -> bool {
        match self {
            Type::Scalar(_) => false,
            Type::Map(map) => map.is_nullable(),
            Type::Array(array) => array.annotations.is_nullable(),
        }
    }

    pub fn as_map(&self) -> Option<&MapType> {
        match self {
            Type::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayType> {
        match self {
            Type::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&ScalarType> {
        match self {
            Type::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ScalarType {
    pub fn new(kind: ScalarKind) -> Self {
        Self { kind }
    }
}

impl MapType {
    /// A map annotated nullable declares no fields; see `new_map_type`.
    pub fn is_nullable(&self) -> bool {
        self.annotations.is_nullable()
    }

    /// Look up a declared field by key
    pub fn item(&self, key: &Key) -> Option<&MapItemType> {
        self.items.iter().find(|item| &item.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.items.iter().map(|item| &item.key)
    }
}

impl MapItemType {
    pub fn is_nullable(&self) -> bool {
        self.annotations.is_nullable()
    }

    /// Whether the field carries a non-null default
    pub fn has_default(&self) -> bool {
        !self.default_value.is_null()
    }
}

impl ArrayType {
    /// The declared type of every element
    pub fn element_type(&self) -> &Type {
        &self.items_type.value_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string_item(key: &str) -> MapItemType {
        MapItemType {
            key: Key::from(key),
            value_type: Type::Scalar(ScalarType::new(ScalarKind::String)),
            default_value: Value::from("x"),
            position: Position::unknown(),
            annotations: SchemaAnnotations::default(),
        }
    }

    #[test]
    fn test_scalar_kind_accepts() {
        assert!(ScalarKind::String.accepts(ValueKind::String));
        assert!(ScalarKind::Integer.accepts(ValueKind::Int));
        assert!(ScalarKind::Boolean.accepts(ValueKind::Bool));
        assert!(!ScalarKind::Integer.accepts(ValueKind::Float));
        assert!(!ScalarKind::String.accepts(ValueKind::Null));
    }

    #[test]
    fn test_map_item_lookup() {
        let map = MapType {
            items: vec![string_item("a"), string_item("b")],
            ..MapType::default()
        };

        assert!(map.item(&Key::from("b")).is_some());
        assert!(map.item(&Key::from("c")).is_none());
        let keys: Vec<String> = map.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_has_default() {
        let mut item = string_item("a");
        assert!(item.has_default());

        item.default_value = Value::Null;
        assert!(!item.has_default());
        assert!(!item.is_nullable());
    }

    #[test]
    fn test_type_names() {
        let array = Type::Array(ArrayType {
            items_type: ArrayItemType {
                value_type: Box::new(Type::Scalar(ScalarType::new(ScalarKind::Boolean))),
                position: Position::unknown(),
            },
            annotations: SchemaAnnotations::default(),
            position: Position::unknown(),
        });

        assert_eq!(array.name(), "array");
        assert_eq!(array.as_array().unwrap().element_type().name(), "boolean");
        assert_eq!(Type::Map(MapType::default()).to_string(), "map");
        assert!(!array.is_nullable());
    }
}
