//! # Validator Engines
//!
//! The seam between the harness and whatever decides conformance. The
//! harness drives a `&dyn DocumentValidator` and never learns which engine
//! it is talking to.

use serde_json::Value;

use espir_core::ValidationViolations;

use crate::validate::ConfigValidator;

/// Anything that can classify a configuration document.
///
/// Implementations must be pure: the same document always yields the same
/// verdict, and checking never panics.
pub trait DocumentValidator {
    /// Short engine name for logs and reports.
    fn name(&self) -> &str;

    /// Check a document, returning the violations that make it non-conformant.
    fn check(&self, document: &Value) -> Result<(), ValidationViolations>;

    /// `true` iff the document is conformant.
    fn validate(&self, document: &Value) -> bool {
        self.check(document).is_ok()
    }
}

impl DocumentValidator for ConfigValidator {
    fn name(&self) -> &str {
        "native"
    }

    fn check(&self, document: &Value) -> Result<(), ValidationViolations> {
        self.check_document(document)
            .map_err(ValidationViolations::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn native_engine_through_trait_object() {
        let engine: &dyn DocumentValidator = &ConfigValidator::new();
        assert_eq!(engine.name(), "native");
        assert!(!engine.validate(&json!({})));
        let violations = engine.check(&json!({})).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations.violations()[0].instance_path, "/schema_version");
    }
}
