//! Source positions for data-tree nodes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a node was read from.
///
/// Lines are 1-indexed. Either part may be unknown, e.g. for nodes that were
/// synthesized rather than parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Name of the file the node came from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Line number (1-indexed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl Position {
    /// Create a known position in a named file.
    pub fn new(file: impl Into<String>, line: usize) -> Self {
        Self {
            file: Some(file.into()),
            line: Some(line),
        }
    }

    /// Create a position with a line number but no file name.
    pub fn at_line(line: usize) -> Self {
        Self {
            file: None,
            line: Some(line),
        }
    }

    /// A position that carries no information.
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Whether the line number is known.
    pub fn is_known(&self) -> bool {
        self.line.is_some()
    }

    /// Render as `file:line`.
    ///
    /// Error messages embed this form verbatim. Without a file the prefix is
    /// dropped; an unknown line renders as `?`.
    pub fn as_compact_string(&self) -> String {
        let prefix = match &self.file {
            Some(file) if !file.is_empty() => format!("{}:", file),
            _ => String::new(),
        };
        match self.line {
            Some(line) => format!("{}{}", prefix, line),
            None => format!("{}?", prefix),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_compact_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_string_known() {
        assert_eq!(Position::new("schema.yml", 3).as_compact_string(), "schema.yml:3");
        assert_eq!(Position::at_line(12).as_compact_string(), "12");
    }

    #[test]
    fn test_compact_string_unknown() {
        assert_eq!(Position::unknown().as_compact_string(), "?");

        let pos = Position {
            file: Some("values.yml".to_string()),
            line: None,
        };
        assert_eq!(pos.as_compact_string(), "values.yml:?");
        assert!(!pos.is_known());
    }

    #[test]
    fn test_empty_file_name_is_dropped() {
        let pos = Position::new("", 4);
        assert_eq!(pos.to_string(), "4");
    }

    #[test]
    fn test_serialization_skips_unknown_parts() {
        let json = serde_json::to_string(&Position::at_line(7)).unwrap();
        assert_eq!(json, r#"{"line":7}"#);

        let deserialized: Position = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, Position::at_line(7));
    }
}
