//! YAML reading and writing for CV documents
//!
//! Documents are kept as [`serde_yaml::Value`] trees. Mappings preserve the
//! order in which keys were encountered, so a document written back by
//! [`DocumentParser::write_file`] keeps the author's layout of keys.
//!
//! Copyright (c) 2025 CV Claw Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{DocumentError, DocumentResult};
use serde_yaml::Value;
use std::path::Path;
use tracing::debug;

/// Reads and writes CV documents
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentParser;

impl DocumentParser {
    /// Create a new document parser
    pub fn new() -> Self {
        Self
    }

    /// Read and parse the document at `path`
    pub fn parse_file(&self, path: &Path) -> DocumentResult<Value> {
        let content =
            std::fs::read_to_string(path).map_err(|e| DocumentError::read(path, e))?;
        debug!(path = %path.display(), bytes = content.len(), "Read document");

        self.parse_yaml(&content, path)
    }

    /// Parse YAML text; `path` is only used for error context
    pub fn parse_yaml(&self, content: &str, path: &Path) -> DocumentResult<Value> {
        serde_yaml::from_str(content).map_err(|e| DocumentError::parse(path, e))
    }

    /// Serialize a document to block-style YAML text
    pub fn to_yaml_string(&self, value: &Value) -> DocumentResult<String> {
        serde_yaml::to_string(value).map_err(|source| DocumentError::Serialize { source })
    }

    /// Serialize a document and parse the text back
    pub fn round_trip(&self, value: &Value) -> DocumentResult<Value> {
        let text = self.to_yaml_string(value)?;
        serde_yaml::from_str(&text).map_err(|source| DocumentError::Reparse { source })
    }

    /// Overwrite `path` with the serialized document
    pub fn write_file(&self, path: &Path, value: &Value) -> DocumentResult<()> {
        let text = self.to_yaml_string(value)?;
        std::fs::write(path, text).map_err(|e| DocumentError::write(path, e))?;
        debug!(path = %path.display(), "Wrote document");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_preserves_key_order() {
        let parser = DocumentParser::new();
        let value = parser
            .parse_yaml("zeta: 1\nalpha: 2\nmid: 3\n", Path::new("doc.yaml"))
            .unwrap();

        let keys: Vec<&str> = value
            .as_mapping()
            .unwrap()
            .keys()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_serialized_output_keeps_order_and_unicode() {
        let parser = DocumentParser::new();
        let value = parser
            .parse_yaml("name: Zoë Ñúñez\ncity: 東京\n", Path::new("doc.yaml"))
            .unwrap();

        let text = parser.to_yaml_string(&value).unwrap();
        assert!(text.contains("Zoë Ñúñez"));
        assert!(text.contains("東京"));
        assert!(text.find("name").unwrap() < text.find("city").unwrap());
    }

    #[test]
    fn test_parse_error_carries_path() {
        let parser = DocumentParser::new();
        let err = parser
            .parse_yaml("key: [unclosed", Path::new("broken.yaml"))
            .unwrap_err();
        assert!(matches!(err, DocumentError::Parse { ref path, .. } if path == &PathBuf::from("broken.yaml")));
    }

    #[test]
    fn test_round_trip_returns_equal_value() {
        let parser = DocumentParser::new();
        let value = parser
            .parse_yaml("cv:\n  name: X\n  list: [1, two, 3.5, true, null]\n", Path::new("doc.yaml"))
            .unwrap();
        assert_eq!(parser.round_trip(&value).unwrap(), value);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let parser = DocumentParser::new();
        let err = parser
            .parse_file(Path::new("/definitely/not/here/cv.yaml"))
            .unwrap_err();
        assert!(matches!(err, DocumentError::Read { .. }));
    }
}
