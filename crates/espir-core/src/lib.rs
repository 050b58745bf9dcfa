//! # espir-core — Foundational Types for the ESP IR Hub Configuration
//!
//! Leaf crate of the workspace. Everything that reads a configuration
//! document goes through the primitives defined here.
//!
//! ## Key Design Principles
//!
//! 1. **Checked lookups only.** Every key access on a document returns a
//!    [`Field`], which distinguishes a missing key from a value of the wrong
//!    JSON kind. Nothing indexes a `serde_json::Value` directly.
//!
//! 2. **Nominal kinds.** [`JsonKind`] keeps integers, floats and booleans
//!    apart: `true` is never an integer and `1` is never a boolean.
//!
//! 3. **Single protocol enum.** [`IrProtocol`] is the one definition of the
//!    closed set of infrared encodings a button may declare.
//!
//! 4. **Documents are values.** A loaded [`Document`] is a plain JSON tree;
//!    mutants are produced by cloning it, never by editing it in place.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `espir-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod document;
pub mod field;
pub mod kind;
pub mod protocol;
pub mod violation;

pub use document::{Document, DocumentError};
pub use field::Field;
pub use kind::JsonKind;
pub use protocol::{IrProtocol, UnknownProtocol};
pub use violation::{ValidationViolations, Violation, ViolationKind};

/// The only `schema_version` this toolchain accepts.
pub const SUPPORTED_SCHEMA_VERSION: u64 = 1;

/// Keys every configuration document must carry at its root, in canonical order.
pub const REQUIRED_TOP_LEVEL_KEYS: [&str; 5] =
    ["schema_version", "system", "network", "mqtt", "homes"];
