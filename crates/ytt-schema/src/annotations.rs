//! Schema annotation extraction
//!
//! Nodes carry an open bag of annotations written by template authors. The
//! schema subsystem understands a closed set of them; everything else is
//! ignored here.

use std::collections::BTreeMap;
use std::fmt;
use ytt_yamlmeta::{Annotation, Node};

/// Annotation names recognized by the schema subsystem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub enum SchemaAnnotationName {
    /// `#@schema/nullable`: the value may be null, and defaults to null
    #[serde(rename = "schema/nullable")]
    Nullable,
}

impl SchemaAnnotationName {
    /// Every recognized name
    pub const ALL: &'static [SchemaAnnotationName] = &[SchemaAnnotationName::Nullable];

    /// The name as written in templates
    pub fn as_str(self) -> &'static str {
        match self {
            SchemaAnnotationName::Nullable => "schema/nullable",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|known| known.as_str() == name)
    }
}

impl fmt::Display for SchemaAnnotationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The schema-relevant annotations of a single node
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct SchemaAnnotations {
    entries: BTreeMap<SchemaAnnotationName, Annotation>,
}

impl SchemaAnnotations {
    /// Filter a node's annotations down to the recognized schema names.
    pub fn from_node(node: &impl Node) -> Self {
        let entries = node
            .annotations()
            .iter()
            .filter_map(|(name, annotation)| {
                SchemaAnnotationName::from_name(name.as_str())
                    .map(|known| (known, annotation.clone()))
            })
            .collect();
        Self { entries }
    }

    pub fn get(&self, name: SchemaAnnotationName) -> Option<&Annotation> {
        self.entries.get(&name)
    }

    pub fn contains(&self, name: SchemaAnnotationName) -> bool {
        self.entries.contains_key(&name)
    }

    pub fn is_nullable(&self) -> bool {
        self.contains(SchemaAnnotationName::Nullable)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SchemaAnnotationName, &Annotation)> {
        self.entries.iter().map(|(name, annotation)| (*name, annotation))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
