//! # ytt-schema
//!
//! Schemas inferred from example documents, and structural checking of data
//! against them.
//!
//! A schema document is written in the same shape as the data it describes.
//! Its values are exemplars: `name: "web"` declares a string field defaulting
//! to `"web"`, and an array holding one item declares the type of every
//! element. `#@schema/nullable` lets a field be null (and defaults it to null).
//!
//! ## Example
//!
//! ```rust
//! use ytt_schema::{DocumentSchema, Schema};
//! use ytt_yamlmeta::{Document, Map, MapItem, NodeRef};
//!
//! let schema_doc = Document::new(
//!     Map::new()
//!         .with_item(MapItem::new("a", "x"))
//!         .with_item(MapItem::new("b", 1_i64)),
//! );
//! let schema = DocumentSchema::new(&schema_doc).unwrap();
//!
//! let data = Document::new(
//!     Map::new()
//!         .with_item(MapItem::new("a", "hello"))
//!         .with_item(MapItem::new("b", 5_i64)),
//! );
//! assert!(schema.assign_type(NodeRef::from(&data)).is_ok());
//! ```

mod annotations;
mod builder;
mod checker;
mod defaults;
mod error;
mod options;
mod schema;
mod types;

pub use annotations::{SchemaAnnotationName, SchemaAnnotations};
pub use builder::{
    new_array_item_type, new_array_type, new_document_type, new_map_item_type, new_map_type,
    new_shared_document_type, type_from_exemplar,
};
pub use checker::{AssignedType, TypeAssignments, TypeCheck, check_document};
pub use defaults::{apply_defaults, default_document};
pub use error::{NodePath, PathSegment, SchemaError, SchemaResult, Violation, ViolationKind};
pub use options::{CheckOptions, SchemaOptions};
pub use schema::{
    AnySchema, DATA_VALUES_SCHEMA_NAME, DocumentSchema, Schema, load_schema, new_document_schema,
};
pub use types::{
    ArrayItemType, ArrayType, DocumentType, MapItemType, MapType, ScalarKind, ScalarType, Type,
};
