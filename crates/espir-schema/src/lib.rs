//! # espir-schema — Configuration Schema Validation
//!
//! Decides whether an ESP IR hub configuration document conforms to the
//! fixed configuration schema.
//!
//! ## Engines
//!
//! - [`ConfigValidator`] (`validate`) — nominal recursive descent over the
//!   typed entity views in [`view`]. Stops at the first violation. This is
//!   the reference engine.
//! - [`JsonSchemaValidator`] (`json_schema`) — the same contract as a
//!   Draft 2020-12 schema, compiled with the `jsonschema` crate. Reports
//!   every violation.
//!
//! Both implement [`DocumentValidator`], the seam the harness drives.
//!
//! ## Crate Policy
//!
//! - Depends only on `espir-core` internally.
//! - Validation is a pure function of the document: no I/O, no state,
//!   no panics. Every outcome is a verdict, never an error.
//! - Documents are never repaired, normalized, or migrated.

pub mod engine;
pub mod json_schema;
pub mod validate;
pub mod view;

pub use engine::DocumentValidator;
pub use json_schema::{JsonSchemaValidator, SchemaBuildError, BUNDLED_SCHEMA};
pub use validate::{validate, ConfigValidator};
