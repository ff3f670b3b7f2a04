//! Schema options
//!
//! These are deserialized from the host tool's settings; every field has a
//! default so partial settings are accepted.

use serde::{Deserialize, Serialize};

/// How type checking treats data that omits declared keys
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CheckOptions {
    /// Accept a missing key when its field carries a non-null default.
    ///
    /// Nullable fields are always accepted when missing.
    pub defaults_satisfy_missing_keys: bool,
}

/// Whether and how schemas are applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SchemaOptions {
    /// When false every document is accepted as-is
    pub enabled: bool,
    pub check: CheckOptions,
}

impl Default for SchemaOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            check: CheckOptions::default(),
        }
    }
}
