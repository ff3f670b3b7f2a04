// Error types for schema construction and type checking

use std::fmt;
use thiserror::Error;
use ytt_yamlmeta::{Key, Position};

/// Errors that make a schema document unusable.
///
/// These are fatal to schema construction: no partial schema is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// An array exemplar must hold exactly one item describing its elements
    #[error("{}", malformed_array_message(.found, .position))]
    MalformedArrayExemplar { found: usize, position: Position },

    /// `#@schema/nullable` placed on an array item
    #[error(
        "Array items cannot be annotated with #@schema/nullable ({}). If this behaviour would be valuable, please submit an issue on https://github.com/vmware-tanzu/carvel-ytt",
        .position.as_compact_string()
    )]
    NullableArrayItem { position: Position },

    /// An exemplar whose kind has no schema type (e.g. a float or null)
    #[error(
        "Collection item type did not match any known types (found {found} at {})",
        .position.as_compact_string()
    )]
    UnknownValueKind {
        found: &'static str,
        position: Position,
    },
}

fn malformed_array_message(found: &usize, position: &Position) -> String {
    if *found == 0 {
        format!(
            "Expected one item in array (describing the type of its elements) at {}",
            position.as_compact_string()
        )
    } else {
        format!(
            "Expected one item (found {}) in array (describing the type of its elements) at {}",
            found,
            position.as_compact_string()
        )
    }
}

impl SchemaError {
    /// Position of the offending schema node
    pub fn position(&self) -> &Position {
        match self {
            SchemaError::MalformedArrayExemplar { position, .. }
            | SchemaError::NullableArrayItem { position }
            | SchemaError::UnknownValueKind { position, .. } => position,
        }
    }
}

/// Result type for schema construction
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Structured kinds of check-time violations
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ViolationKind {
    /// The node's kind differs from the declared type
    MismatchedType { expected: String, found: String },

    /// A key present in data that the schema does not declare
    UnknownKey { key: String },

    /// A declared key absent from data
    MissingKey { key: String },

    /// An explicit null where the declared type is not nullable
    NullValue { expected: String },
}

impl ViolationKind {
    /// Get the error code for this violation kind
    pub fn error_code(&self) -> &'static str {
        match self {
            ViolationKind::MismatchedType { .. } => "YS-1-01",
            ViolationKind::UnknownKey { .. } => "YS-1-02",
            ViolationKind::MissingKey { .. } => "YS-1-03",
            ViolationKind::NullValue { .. } => "YS-1-04",
        }
    }

    /// Format a human-readable message from this violation kind
    pub fn message(&self) -> String {
        match self {
            ViolationKind::MismatchedType { expected, found } => {
                format!("Expected {}, found {}", expected, found)
            }
            ViolationKind::UnknownKey { key } => {
                format!("Unexpected key '{}' (not declared in schema)", key)
            }
            ViolationKind::MissingKey { key } => {
                format!("Missing required key '{}'", key)
            }
            ViolationKind::NullValue { expected } => {
                format!("Expected {}, found null (value is not nullable)", expected)
            }
        }
    }
}

/// A single mismatch between data and schema
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Violation {
    pub kind: ViolationKind,
    /// Path to the offending node (e.g. `service.ports.[0]`)
    pub path: NodePath,
    /// Source position of the offending node
    pub position: Position,
}

impl Violation {
    pub fn new(kind: ViolationKind, path: NodePath, position: Position) -> Self {
        Self {
            kind,
            path,
            position,
        }
    }

    pub fn message(&self) -> String {
        self.kind.message()
    }

    pub fn error_code(&self) -> &'static str {
        self.kind.error_code()
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}",
            self.position.as_compact_string(),
            self.kind.message()
        )
    }
}

/// Path from the document root to a node (e.g. `["service", "ports", 0]`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[serde(transparent)]
pub struct NodePath {
    segments: Vec<PathSegment>,
}

impl NodePath {
    /// The empty path, addressing the document itself
    pub fn root() -> Self {
        Self::default()
    }

    pub fn push_key(&mut self, key: &Key) {
        self.segments.push(PathSegment::Key(key.clone()));
    }

    pub fn push_index(&mut self, index: usize) {
        self.segments.push(PathSegment::Index(index));
    }

    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }

    /// A copy of this path extended by a key segment
    pub fn key(&self, key: impl Into<Key>) -> Self {
        let mut path = self.clone();
        path.segments.push(PathSegment::Key(key.into()));
        path
    }

    /// A copy of this path extended by an index segment
    pub fn index(&self, index: usize) -> Self {
        let mut path = self.clone();
        path.segments.push(PathSegment::Index(index));
        path
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            write!(f, "(root)")
        } else {
            for (i, segment) in self.segments.iter().enumerate() {
                if i > 0 {
                    write!(f, ".")?;
                }
                write!(f, "{}", segment)?;
            }
            Ok(())
        }
    }
}

/// A segment in a node path.
///
/// Keys stay typed: `1` and `"1"` are different segments even though both
/// display as `1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Map key
    Key(Key),
    /// Array index
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{}", key),
            PathSegment::Index(index) => write!(f, "[{}]", index),
        }
    }
}
