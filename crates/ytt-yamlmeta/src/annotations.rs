//! Annotations attached to data-tree nodes
//!
//! Annotations arrive from the template layer (`#@name args` comments in the
//! source). This crate only stores them; consumers such as the schema
//! subsystem decide which names they understand.

use crate::position::Position;
use crate::value::Value;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Name of an annotation, e.g. `schema/nullable`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AnnotationName(String);

impl AnnotationName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnnotationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AnnotationName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Metadata of a single annotation occurrence.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Annotation {
    /// Where the annotation itself was written
    pub position: Position,
    /// Positional arguments
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<Value>,
    /// Keyword arguments, in source order
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub kwargs: IndexMap<String, Value>,
}

impl Annotation {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn with_arg(mut self, arg: impl Into<Value>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn with_kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.kwargs.insert(name.into(), value.into());
        self
    }
}

/// All annotations attached to one node, keyed by name.
///
/// A name occurs at most once per node; re-inserting a name replaces the
/// earlier entry but keeps its original slot in iteration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Annotations {
    entries: IndexMap<AnnotationName, Annotation>,
}

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<AnnotationName>, annotation: Annotation) {
        self.entries.insert(name.into(), annotation);
    }

    pub fn get(&self, name: &str) -> Option<&Annotation> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AnnotationName, &Annotation)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::borrow::Borrow<str> for AnnotationName {
    fn borrow(&self) -> &str {
        &self.0
    }
}
