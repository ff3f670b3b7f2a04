//! Schemas that data documents are checked against

use crate::builder::new_shared_document_type;
use crate::checker::{TypeCheck, check_document};
use crate::defaults::{apply_defaults, default_document};
use crate::error::SchemaResult;
use crate::options::{CheckOptions, SchemaOptions};
use crate::types::DocumentType;
use std::sync::Arc;
use ytt_yamlmeta::{Document, NodeRef};

/// Logical name of the data values schema
pub const DATA_VALUES_SCHEMA_NAME: &str = "dataValues";

/// Something data nodes can be checked against.
///
/// Checking never modifies the node; resolved types come back in the
/// [`TypeCheck`] side table.
pub trait Schema: Send + Sync {
    fn assign_type<'s>(&'s self, node: NodeRef<'_>) -> TypeCheck<'s>;
}

/// Accepts every node; used when no schema was declared
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnySchema;

impl Schema for AnySchema {
    fn assign_type<'s>(&'s self, _node: NodeRef<'_>) -> TypeCheck<'s> {
        TypeCheck::accepted()
    }
}

/// A schema derived from an example document
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSchema {
    pub name: String,
    /// The schema document, for diagnostics
    pub source: Arc<Document>,
    pub allowed: DocumentType,
    pub check_options: CheckOptions,
}

impl DocumentSchema {
    /// Build the data values schema from a schema document.
    pub fn new(doc: &Document) -> SchemaResult<Self> {
        Self::from_shared(Arc::new(doc.clone()))
    }

    /// Build the data values schema without copying the schema document.
    pub fn from_shared(doc: Arc<Document>) -> SchemaResult<Self> {
        let allowed = new_shared_document_type(doc)?;
        Ok(Self {
            name: DATA_VALUES_SCHEMA_NAME.to_string(),
            source: Arc::clone(&allowed.source),
            allowed,
            check_options: CheckOptions::default(),
        })
    }

    pub fn with_check_options(mut self, check_options: CheckOptions) -> Self {
        self.check_options = check_options;
        self
    }

    /// The data values produced by the schema alone
    pub fn default_data_values(&self) -> Document {
        default_document(&self.allowed)
    }

    /// A copy of `data` with missing keys filled from schema defaults
    pub fn apply_defaults(&self, data: &Document) -> Document {
        apply_defaults(&self.allowed, data)
    }
}

impl Schema for DocumentSchema {
    fn assign_type<'s>(&'s self, node: NodeRef<'_>) -> TypeCheck<'s> {
        check_document(&self.allowed, node, &self.check_options)
    }
}

/// Build the data values schema from a schema document.
pub fn new_document_schema(doc: &Document) -> SchemaResult<DocumentSchema> {
    DocumentSchema::new(doc)
}

/// Pick the schema to check data values against.
///
/// Without a schema document, or with schemas disabled, everything is
/// accepted.
pub fn load_schema(
    doc: Option<&Document>,
    options: &SchemaOptions,
) -> SchemaResult<Box<dyn Schema>> {
    match doc {
        Some(doc) if options.enabled => {
            let schema = DocumentSchema::new(doc)?.with_check_options(options.check.clone());
            tracing::debug!(name = %schema.name, "Using document schema");
            Ok(Box::new(schema))
        }
        _ => {
            tracing::debug!(
                enabled = options.enabled,
                "No schema in effect; accepting any data"
            );
            Ok(Box::new(AnySchema))
        }
    }
}
