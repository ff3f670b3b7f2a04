//! Default values derived from a schema
//!
//! Exemplars double as defaults, but only after they are turned back into
//! data: nested array exemplars become empty arrays and nullable fields
//! become null. Inputs are never modified; callers get new trees.

use crate::types::{DocumentType, MapItemType, MapType, ScalarKind, Type};
use ytt_yamlmeta::{Array, Document, Map, MapItem, Value};

impl Type {
    /// The data a value of this type takes when nothing else is given.
    ///
    /// A bare scalar type has no exemplar and yields the zero value of its
    /// kind. Map fields keep their own defaults (see
    /// [`MapItemType::data_default`]).
    pub fn default_value(&self) -> Value {
        match self {
            Type::Scalar(scalar) => match scalar.kind {
                ScalarKind::String => Value::String(String::new()),
                ScalarKind::Integer => Value::Int(0),
                ScalarKind::Boolean => Value::Bool(false),
            },
            Type::Map(map_type) => Value::Map(map_type.default_map()),
            Type::Array(array_type) => Value::Array(Array::new().at(array_type.position.clone())),
        }
    }
}

impl MapType {
    fn default_map(&self) -> Map {
        let mut map = Map::new().at(self.position.clone());
        for item_type in &self.items {
            let item = MapItem::new(item_type.key.clone(), item_type.data_default());
            map.insert(item.at(item_type.position.clone()));
        }
        map
    }
}

impl MapItemType {
    /// `default_value` as data: null when nullable, otherwise the exemplar
    /// with nested maps and arrays rebuilt from their types.
    pub fn data_default(&self) -> Value {
        if self.default_value.is_null() {
            return Value::Null;
        }
        match &self.value_type {
            Type::Scalar(_) => self.default_value.clone(),
            container => container.default_value(),
        }
    }
}

/// The document a schema yields when no data is supplied.
pub fn default_document(doc_type: &DocumentType) -> Document {
    let value = match &doc_type.value_type {
        Some(value_type) => value_type.default_value(),
        None => doc_type.source.value.clone(),
    };
    Document::new(value).at(doc_type.source.position.clone())
}

/// A copy of `data` with missing declared keys filled from their defaults.
///
/// Only non-null defaults are inserted. Values whose kind does not match the
/// schema are left untouched; reporting them is the checker's job.
pub fn apply_defaults(doc_type: &DocumentType, data: &Document) -> Document {
    let mut filled = data.clone();
    if let Some(value_type) = &doc_type.value_type {
        fill_value(&mut filled.value, value_type);
    }
    filled
}

fn fill_value(value: &mut Value, declared: &Type) {
    match (declared, value) {
        (Type::Map(map_type), Value::Map(map)) => fill_map(map, map_type),
        (Type::Array(array_type), Value::Array(array)) => {
            for item in &mut array.items {
                fill_value(&mut item.value, array_type.element_type());
            }
        }
        _ => {}
    }
}

fn fill_map(map: &mut Map, map_type: &MapType) {
    for item in &mut map.items {
        if let Some(item_type) = map_type.item(&item.key) {
            fill_value(&mut item.value, &item_type.value_type);
        }
    }

    for item_type in &map_type.items {
        if map.contains_key(&item_type.key) {
            continue;
        }
        let default = item_type.data_default();
        if !default.is_null() {
            tracing::trace!(key = %item_type.key, "Filling missing key from schema default");
            let item = MapItem::new(item_type.key.clone(), default);
            map.insert(item.at(item_type.position.clone()));
        }
    }
}
