//! # ytt-yamlmeta
//!
//! The data tree that ytt templates and schemas operate on.
//!
//! A [`Document`] holds a [`Value`]; containers ([`Map`], [`Array`]) and the
//! items inside them ([`MapItem`], [`ArrayItem`]) are nodes: each carries a
//! source [`Position`] and the [`Annotations`] written against it. Scalars are
//! plain values positioned by the item that holds them.
//!
//! Turning text into this tree is the loader's job; this crate only models
//! the result.
//!
//! ## Example
//!
//! ```rust
//! use ytt_yamlmeta::{Document, Map, MapItem, Node, Position};
//!
//! let doc = Document::new(
//!     Map::new()
//!         .at(Position::new("values.yml", 1))
//!         .with_item(MapItem::new("replicas", 3_i64).at(Position::new("values.yml", 1))),
//! );
//!
//! let map = doc.value.as_map().unwrap();
//! assert_eq!(map.position().as_compact_string(), "values.yml:1");
//! ```

mod annotations;
mod node;
mod position;
mod value;

pub use annotations::{Annotation, AnnotationName, Annotations};
pub use node::{Array, ArrayItem, Document, Map, MapItem, Node, NodeKind, NodeRef};
pub use position::Position;
pub use value::{Key, Value, ValueKind};
