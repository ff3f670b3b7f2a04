//! Schema construction from example documents
//!
//! Every value in a schema document is an exemplar: it is read for its shape,
//! not as data. Maps declare their fields, arrays declare their element type
//! through a single item, and scalars declare their primitive kind.

use crate::annotations::SchemaAnnotations;
use crate::error::{SchemaError, SchemaResult};
use crate::types::{
    ArrayItemType, ArrayType, DocumentType, MapItemType, MapType, ScalarKind, ScalarType, Type,
};
use std::sync::Arc;
use ytt_yamlmeta::{Array, ArrayItem, Document, Map, MapItem, Node, Position, Value};

/// Build the type of a whole schema document.
///
/// A Map or Array top-level value is typed; any other top-level value leaves
/// `value_type` absent. The document is copied; use
/// [`new_shared_document_type`] to keep a shared one.
pub fn new_document_type(doc: &Document) -> SchemaResult<DocumentType> {
    new_shared_document_type(Arc::new(doc.clone()))
}

/// Build the type of a schema document that is already shared.
pub fn new_shared_document_type(doc: Arc<Document>) -> SchemaResult<DocumentType> {
    let value_type = match &doc.value {
        Value::Map(map) => Some(Type::Map(new_map_type(map)?)),
        Value::Array(array) => Some(Type::Array(new_array_type(array)?)),
        _ => None,
    };

    tracing::debug!(
        position = %doc.position,
        value_type = value_type.as_ref().map_or("none", Type::name),
        "Built document type"
    );

    Ok(DocumentType {
        value_type,
        source: doc,
    })
}

/// Build a map type with one field per item, in order.
///
/// Fails on the first item that fails. A map annotated nullable keeps no
/// fields at all.
pub fn new_map_type(map: &Map) -> SchemaResult<MapType> {
    let mut items = map
        .items
        .iter()
        .map(new_map_item_type)
        .collect::<SchemaResult<Vec<_>>>()?;

    let annotations = SchemaAnnotations::from_node(map);
    if annotations.is_nullable() {
        tracing::trace!(
            position = %map.position,
            dropped = items.len(),
            "Nullable map declares no fields"
        );
        items.clear();
    }

    Ok(MapType {
        items,
        annotations,
        position: map.position.clone(),
    })
}

/// Build the declared type of a single map field.
///
/// The default is the exemplar itself, except that an array exemplar
/// defaults to an empty array and a nullable field defaults to null.
pub fn new_map_item_type(item: &MapItem) -> SchemaResult<MapItemType> {
    let value_type = type_from_exemplar(&item.value, &item.position)?;
    let annotations = SchemaAnnotations::from_node(item);

    let default_value = if annotations.is_nullable() {
        Value::Null
    } else if let Value::Array(array) = &item.value {
        Value::Array(Array::new().at(array.position.clone()))
    } else {
        item.value.clone()
    };

    tracing::trace!(
        key = %item.key,
        position = %item.position,
        value_type = value_type.name(),
        nullable = annotations.is_nullable(),
        "Built map item type"
    );

    Ok(MapItemType {
        key: item.key.clone(),
        value_type,
        default_value,
        position: item.position.clone(),
        annotations,
    })
}

/// Build an array type from an exemplar holding exactly one item.
pub fn new_array_type(array: &Array) -> SchemaResult<ArrayType> {
    let [item] = array.items.as_slice() else {
        return Err(SchemaError::MalformedArrayExemplar {
            found: array.items.len(),
            position: array.position.clone(),
        });
    };

    let items_type = new_array_item_type(item)?;

    Ok(ArrayType {
        items_type,
        annotations: SchemaAnnotations::from_node(array),
        position: array.position.clone(),
    })
}

/// Build the element type of an array.
///
/// Elements share one type, so a single element cannot be nullable on its
/// own; that placement is rejected whatever the item's value.
pub fn new_array_item_type(item: &ArrayItem) -> SchemaResult<ArrayItemType> {
    if SchemaAnnotations::from_node(item).is_nullable() {
        return Err(SchemaError::NullableArrayItem {
            position: item.position().clone(),
        });
    }

    let value_type = type_from_exemplar(&item.value, &item.position)?;

    Ok(ArrayItemType {
        value_type: Box::new(value_type),
        position: item.position.clone(),
    })
}

/// Derive a type from an exemplar value.
///
/// `position` is that of the node holding the value; scalars have none of
/// their own.
pub fn type_from_exemplar(value: &Value, position: &Position) -> SchemaResult<Type> {
    let scalar = |kind: ScalarKind| -> SchemaResult<Type> {
        Ok(Type::Scalar(ScalarType::new(kind)))
    };

    match value {
        Value::Map(map) => Ok(Type::Map(new_map_type(map)?)),
        Value::Array(array) => Ok(Type::Array(new_array_type(array)?)),
        Value::String(_) => scalar(ScalarKind::String),
        Value::Int(_) => scalar(ScalarKind::Integer),
        Value::Bool(_) => scalar(ScalarKind::Boolean),
        Value::Float(_) | Value::Null => Err(SchemaError::UnknownValueKind {
            found: value.kind().name(),
            position: position.clone(),
        }),
    }
}
