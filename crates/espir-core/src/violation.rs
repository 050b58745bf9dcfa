//! # Structured Violations
//!
//! A rejected document is reported as one or more [`Violation`]s, each
//! carrying the JSON pointer of the offending node and a typed reason.
//! Validators fold these into a boolean verdict; the harness and the CLI
//! use them to explain why a baseline was refused.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::kind::JsonKind;

/// Why a node was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    #[error("required key is missing")]
    MissingKey,

    #[error("expected {expected}, found {found}")]
    WrongType { expected: JsonKind, found: JsonKind },

    /// `schema_version` is an integer other than the supported one, or not
    /// an integer at all.
    #[error("unsupported schema_version {found}, expected {supported}")]
    UnsupportedSchemaVersion { found: String, supported: u64 },

    #[error("unknown IR protocol {found}, expected one of NEC, RC5, Sony, RAW")]
    UnknownProtocol { found: String },

    /// Reported verbatim by a JSON Schema engine.
    #[error("{message}")]
    Schema { schema_path: String, message: String },
}

/// A single rejected node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// JSON Pointer to the violating node; empty for the document root.
    pub instance_path: String,
    pub kind: ViolationKind,
}

impl Violation {
    pub fn new(instance_path: impl Into<String>, kind: ViolationKind) -> Self {
        Self {
            instance_path: instance_path.into(),
            kind,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.kind)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.kind)
        }
    }
}

/// Collection of validation violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl std::error::Error for Violation {}

impl From<Violation> for ValidationViolations {
    fn from(violation: Violation) -> Self {
        Self {
            violations: vec![violation],
        }
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationViolations {}
