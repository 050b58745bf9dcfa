//! # JSON Schema Engine
//!
//! The configuration contract expressed as a Draft 2020-12 JSON Schema
//! (`schemas/system-config.schema.json`) and checked with the `jsonschema`
//! crate. Unlike the nominal engine it reports every violation, each with
//! its instance path and the schema path that triggered it.
//!
//! ## Schema Resolution
//!
//! The schema is self-contained: the containment tree is expressed with
//! internal `#/$defs/<level>` references, which the `jsonschema` crate
//! resolves natively. Any other `$ref` is refused by [`OfflineRetriever`]
//! so that building a validator never touches the network.
//!
//! ## Nominal Kinds
//!
//! JSON Schema's `integer` matches any number with a zero fractional part,
//! so `1.0` satisfies both `"type": "integer"` and `"const": 1`. Kinds are
//! nominal in this toolchain, so a document the schema accepts is also run
//! through the kind checks of [`ConfigValidator`], and its violation is
//! reported alongside.

use std::fmt;
use std::path::Path;

use jsonschema::{Retrieve, Uri, ValidationOptions, Validator};
use serde_json::Value;
use thiserror::Error;

use espir_core::{ValidationViolations, Violation, ViolationKind};

use crate::engine::DocumentValidator;
use crate::validate::ConfigValidator;

/// The schema shipped with this crate.
pub const BUNDLED_SCHEMA: &str = include_str!("../schemas/system-config.schema.json");

/// Error while loading or compiling a JSON Schema.
#[derive(Error, Debug)]
pub enum SchemaBuildError {
    /// The schema file could not be read or is not valid JSON.
    #[error("schema load error for '{schema_name}': {reason}")]
    Load {
        schema_name: String,
        reason: String,
    },

    /// The schema is valid JSON but not a valid schema.
    #[error("validator build error for schema '{schema_name}': {reason}")]
    Build {
        schema_name: String,
        reason: String,
    },
}

/// Refuses every external `$ref`.
struct OfflineRetriever;

impl Retrieve for OfflineRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        Err(format!("external schema references are not supported: {}", uri.as_str()).into())
    }
}

/// A compiled JSON Schema for configuration documents.
pub struct JsonSchemaValidator {
    schema_name: String,
    validator: Validator,
    nominal: ConfigValidator,
}

impl JsonSchemaValidator {
    /// Compile the schema bundled with this crate.
    pub fn bundled() -> Result<Self, SchemaBuildError> {
        let schema: Value =
            serde_json::from_str(BUNDLED_SCHEMA).map_err(|e| SchemaBuildError::Load {
                schema_name: "system-config.schema.json".to_string(),
                reason: format!("invalid JSON: {e}"),
            })?;
        Self::from_value("system-config.schema.json", &schema)
    }

    /// Load and compile a schema file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SchemaBuildError> {
        let path = path.as_ref();
        let schema_name = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| SchemaBuildError::Load {
            schema_name: schema_name.clone(),
            reason: format!("cannot read file: {e}"),
        })?;
        let schema: Value = serde_json::from_str(&content).map_err(|e| SchemaBuildError::Load {
            schema_name: schema_name.clone(),
            reason: format!("invalid JSON: {e}"),
        })?;
        Self::from_value(schema_name, &schema)
    }

    /// Compile an in-memory schema.
    pub fn from_value(
        schema_name: impl Into<String>,
        schema: &Value,
    ) -> Result<Self, SchemaBuildError> {
        let schema_name = schema_name.into();
        let validator = build_options()
            .build(schema)
            .map_err(|e| SchemaBuildError::Build {
                schema_name: schema_name.clone(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            schema_name,
            validator,
            nominal: ConfigValidator::new(),
        })
    }

    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }
}

fn build_options() -> ValidationOptions {
    let mut opts = jsonschema::options();
    opts.with_draft(jsonschema::Draft::Draft202012);
    opts.with_retriever(OfflineRetriever);
    opts
}

impl fmt::Debug for JsonSchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonSchemaValidator")
            .field("schema_name", &self.schema_name)
            .finish_non_exhaustive()
    }
}

impl DocumentValidator for JsonSchemaValidator {
    fn name(&self) -> &str {
        "json-schema"
    }

    fn check(&self, document: &Value) -> Result<(), ValidationViolations> {
        let mut errors: Vec<Violation> = self
            .validator
            .iter_errors(document)
            .map(|e| {
                Violation::new(
                    e.instance_path.to_string(),
                    ViolationKind::Schema {
                        schema_path: e.schema_path.to_string(),
                        message: e.to_string(),
                    },
                )
            })
            .collect();

        if errors.is_empty() {
            if let Err(violation) = self.nominal.check_document(document) {
                errors.push(violation);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationViolations::new(errors))
        }
    }

    fn validate(&self, document: &Value) -> bool {
        self.validator.is_valid(document) && self.nominal.check_document(document).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal() -> Value {
        json!({
            "schema_version": 1,
            "system": { "device_id": "d", "timezone": "UTC",
                        "boot_fail_limit": 3, "safe_mode_enabled": false },
            "network": { "wifi": { "ssid": "s", "password": "p", "reconnect_interval_sec": 5 } },
            "mqtt": { "broker": "b", "port": 1883, "base_topic": "t",
                      "enabled": true, "ha_discovery": true, "retain": true },
            "homes": []
        })
    }

    #[test]
    fn bundled_schema_compiles() {
        let engine = JsonSchemaValidator::bundled().unwrap();
        assert_eq!(engine.schema_name(), "system-config.schema.json");
        assert_eq!(engine.name(), "json-schema");
    }

    #[test]
    fn minimal_document_is_valid() {
        let engine = JsonSchemaValidator::bundled().unwrap();
        assert!(engine.validate(&minimal()));
        assert!(engine.check(&minimal()).is_ok());
    }

    #[test]
    fn reports_every_violation() {
        let engine = JsonSchemaValidator::bundled().unwrap();
        let mut doc = minimal();
        doc["mqtt"]["port"] = json!("1883");
        doc["system"]["safe_mode_enabled"] = json!(0);
        let violations = engine.check(&doc).unwrap_err();
        assert!(violations.len() >= 2, "got: {violations}");
        let paths: Vec<&str> = violations
            .violations()
            .iter()
            .map(|v| v.instance_path.as_str())
            .collect();
        assert!(paths.contains(&"/mqtt/port"), "paths: {paths:?}");
        assert!(paths.contains(&"/system/safe_mode_enabled"), "paths: {paths:?}");
    }

    #[test]
    fn integral_floats_rejected() {
        let engine = JsonSchemaValidator::bundled().unwrap();
        for (pointer, value) in [
            ("/schema_version", json!(1.0)),
            ("/system/boot_fail_limit", json!(3.0)),
            ("/network/wifi/reconnect_interval_sec", json!(5.0)),
            ("/mqtt/port", json!(1883.0)),
        ] {
            let mut doc = minimal();
            *doc.pointer_mut(pointer).unwrap() = value;
            assert!(!engine.validate(&doc), "{pointer} as float accepted");
            let violations = engine.check(&doc).unwrap_err();
            assert_eq!(violations.violations()[0].instance_path, pointer);
        }
    }

    #[test]
    fn homes_mapping_rejected() {
        let engine = JsonSchemaValidator::bundled().unwrap();
        let mut doc = minimal();
        doc["homes"] = json!({});
        assert!(!engine.validate(&doc));
    }

    #[test]
    fn from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonSchemaValidator::from_path(dir.path().join("nope.schema.json")).unwrap_err();
        assert!(matches!(err, SchemaBuildError::Load { .. }));
    }

    #[test]
    fn from_path_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.schema.json");
        std::fs::write(&path, b"{ nope").unwrap();
        let err = JsonSchemaValidator::from_path(&path).unwrap_err();
        assert!(err.to_string().contains("invalid JSON"));
    }

    #[test]
    fn from_path_matches_bundled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("system-config.schema.json");
        std::fs::write(&path, BUNDLED_SCHEMA).unwrap();
        let engine = JsonSchemaValidator::from_path(&path).unwrap();
        assert!(engine.validate(&minimal()));
    }
}
