//! Data-tree nodes.

use crate::annotations::{Annotation, AnnotationName, Annotations};
use crate::position::Position;
use crate::value::{Key, Value};
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use std::fmt;

/// Kind of a data-tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    Map,
    MapItem,
    Array,
    ArrayItem,
}

impl NodeKind {
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Document => "document",
            NodeKind::Map => "map",
            NodeKind::MapItem => "map item",
            NodeKind::Array => "array",
            NodeKind::ArrayItem => "array item",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Capabilities shared by every node: a source position and annotations.
pub trait Node {
    fn kind(&self) -> NodeKind;
    fn position(&self) -> &Position;
    fn annotations(&self) -> &Annotations;
}

/// A single YAML document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Document {
    pub value: Value,
    #[serde(skip)]
    pub position: Position,
    #[serde(skip)]
    pub annotations: Annotations,
}

/// A mapping; items keep insertion order and keys are unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Map {
    pub items: Vec<MapItem>,
    pub position: Position,
    pub annotations: Annotations,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapItem {
    pub key: Key,
    pub value: Value,
    pub position: Position,
    pub annotations: Annotations,
}

/// A sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Array {
    pub items: Vec<ArrayItem>,
    #[serde(skip)]
    pub position: Position,
    #[serde(skip)]
    pub annotations: Annotations,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ArrayItem {
    pub value: Value,
    #[serde(skip)]
    pub position: Position,
    #[serde(skip)]
    pub annotations: Annotations,
}

impl Document {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            position: Position::unknown(),
            annotations: Annotations::new(),
        }
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }
}

impl Map {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Append an item, replacing an existing item with the same key in place.
    pub fn with_item(mut self, item: MapItem) -> Self {
        self.insert(item);
        self
    }

    pub fn insert(&mut self, item: MapItem) {
        match self.items.iter_mut().find(|existing| existing.key == item.key) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
    }

    pub fn get(&self, key: &Key) -> Option<&MapItem> {
        self.items.iter().find(|item| &item.key == key)
    }

    pub fn contains_key(&self, key: &Key) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl MapItem {
    pub fn new(key: impl Into<Key>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            position: Position::unknown(),
            annotations: Annotations::new(),
        }
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }
}

impl Array {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_item(mut self, item: ArrayItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ArrayItem {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            position: Position::unknown(),
            annotations: Annotations::new(),
        }
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }
}

// Maps serialize as plain mappings; positions and annotations are metadata.
impl Serialize for Map {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.items.len()))?;
        for item in &self.items {
            map.serialize_entry(&EntryKey(&item.key), &item.value)?;
        }
        map.end()
    }
}

/// Bool and null keys are written as their text (`true`, `null`); formats
/// such as JSON only take string and integer keys.
struct EntryKey<'a>(&'a Key);

impl Serialize for EntryKey<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Key::String(s) => serializer.serialize_str(s),
            Key::Int(n) => serializer.serialize_i64(*n),
            Key::Bool(_) | Key::Null => serializer.collect_str(self.0),
        }
    }
}

macro_rules! impl_node {
    ($ty:ident) => {
        impl Node for $ty {
            fn kind(&self) -> NodeKind {
                NodeKind::$ty
            }

            fn position(&self) -> &Position {
                &self.position
            }

            fn annotations(&self) -> &Annotations {
                &self.annotations
            }
        }

        impl $ty {
            /// Attach an annotation positioned at this node.
            pub fn annotated(mut self, name: impl Into<AnnotationName>) -> Self {
                let annotation = Annotation::new(self.position.clone());
                self.annotations.insert(name, annotation);
                self
            }

            pub fn with_annotation(
                mut self,
                name: impl Into<AnnotationName>,
                annotation: Annotation,
            ) -> Self {
                self.annotations.insert(name, annotation);
                self
            }
        }
    };
}

impl_node!(Document);
impl_node!(Map);
impl_node!(MapItem);
impl_node!(Array);
impl_node!(ArrayItem);

/// A borrowed handle to any node.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Document(&'a Document),
    Map(&'a Map),
    MapItem(&'a MapItem),
    Array(&'a Array),
    ArrayItem(&'a ArrayItem),
}

impl<'a> NodeRef<'a> {
    /// The node held by a value, if the value is a container.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::Map(map) => Some(NodeRef::Map(map)),
            Value::Array(array) => Some(NodeRef::Array(array)),
            _ => None,
        }
    }

    fn inner(&self) -> &'a dyn Node {
        match *self {
            NodeRef::Document(node) => node,
            NodeRef::Map(node) => node,
            NodeRef::MapItem(node) => node,
            NodeRef::Array(node) => node,
            NodeRef::ArrayItem(node) => node,
        }
    }
}

impl Node for NodeRef<'_> {
    fn kind(&self) -> NodeKind {
        self.inner().kind()
    }

    fn position(&self) -> &Position {
        self.inner().position()
    }

    fn annotations(&self) -> &Annotations {
        self.inner().annotations()
    }
}

impl<'a> From<&'a Document> for NodeRef<'a> {
    fn from(node: &'a Document) -> Self {
        NodeRef::Document(node)
    }
}

impl<'a> From<&'a Map> for NodeRef<'a> {
    fn from(node: &'a Map) -> Self {
        NodeRef::Map(node)
    }
}

impl<'a> From<&'a MapItem> for NodeRef<'a> {
    fn from(node: &'a MapItem) -> Self {
        NodeRef::MapItem(node)
    }
}

impl<'a> From<&'a Array> for NodeRef<'a> {
    fn from(node: &'a Array) -> Self {
        NodeRef::Array(node)
    }
}

impl<'a> From<&'a ArrayItem> for NodeRef<'a> {
    fn from(node: &'a ArrayItem) -> Self {
        NodeRef::ArrayItem(node)
    }
}
