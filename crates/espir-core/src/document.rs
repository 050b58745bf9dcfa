//! # Configuration Documents
//!
//! Loading a configuration file into a JSON value tree.
//!
//! A [`Document`] is never edited in place by the toolchain. Mutants are
//! made by cloning the tree and editing the copy.

use std::path::Path;

use serde_json::Value;
use thiserror::Error;

/// Error while reading or parsing a configuration document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The file could not be read.
    #[error("cannot read '{path}'")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The content is not well-formed JSON.
    #[error("document parse error for '{path}': {reason}")]
    Parse { path: String, reason: String },
}

/// A parsed configuration document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Value,
}

impl Document {
    /// Read and parse the JSON document at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
            path: display.clone(),
            source,
        })?;
        Self::parse(&content, &display)
    }

    /// Parse document text. `origin` names the source in errors.
    pub fn parse(content: &str, origin: &str) -> Result<Self, DocumentError> {
        let root = serde_json::from_str(content).map_err(|e| DocumentError::Parse {
            path: origin.to_string(),
            reason: format!("invalid JSON: {e}"),
        })?;
        Ok(Self { root })
    }

    pub fn as_value(&self) -> &Value {
        &self.root
    }

    pub fn into_value(self) -> Value {
        self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::error::Error as _;

    #[test]
    fn parse_json() {
        let doc = Document::parse(r#"{"schema_version": 1, "homes": []}"#, "inline").unwrap();
        assert_eq!(doc.as_value()["schema_version"], 1);
        assert_eq!(doc.as_value()["homes"], json!([]));
    }

    #[test]
    fn parse_keeps_integer_and_float_apart() {
        let doc = Document::parse(r#"{"a": 1883, "b": 1883.0, "c": "1883"}"#, "inline").unwrap();
        let v = doc.as_value();
        assert!(v["a"].is_u64());
        assert!(v["b"].is_f64());
        assert!(v["c"].is_string());
    }

    #[test]
    fn parse_malformed_json_fails() {
        let err = Document::parse("{\"schema_version\": ", "inline").unwrap_err();
        match &err {
            DocumentError::Parse { path, reason } => {
                assert_eq!(path, "inline");
                assert!(reason.contains("invalid JSON"));
            }
            other => panic!("Expected Parse, got: {other}"),
        }
    }

    #[test]
    fn from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Document::from_path(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, DocumentError::Read { .. }));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn read_error_message_does_not_repeat_source() {
        let dir = tempfile::tempdir().unwrap();
        let err = Document::from_path(dir.path().join("missing.json")).unwrap_err();
        let source = err.source().unwrap().to_string();
        assert!(!err.to_string().contains(&source));
    }

    #[test]
    fn from_path_reports_path_on_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, b"{ not json").unwrap();
        let err = Document::from_path(&path).unwrap_err();
        match err {
            DocumentError::Parse { path: p, reason } => {
                assert!(p.ends_with("broken.json"));
                assert!(reason.contains("invalid JSON"));
            }
            other => panic!("Expected Parse, got: {other}"),
        }
    }

    #[test]
    fn into_value_returns_tree() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("system_config.json");
        std::fs::write(&path, br#"{"homes": [{"home_id": "h1"}]}"#).unwrap();
        let value = Document::from_path(&path).unwrap().into_value();
        assert_eq!(value["homes"][0]["home_id"], "h1");
    }
}
