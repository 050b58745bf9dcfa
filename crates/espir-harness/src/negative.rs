//! # Negative Cases
//!
//! Labeled mutants derived from a known-valid baseline, each invalid by
//! construction rather than by checking it against a validator:
//!
//! | Label | Corruption |
//! |---|---|
//! | `missing_<key>` | one required top-level key removed |
//! | `unsupported_schema` | `schema_version` set to 2 |
//! | `invalid_protocol` | first button's `protocol` set to `"INVALID"` |
//!
//! Every case owns an independent deep copy of the baseline.

use serde::Serialize;
use serde_json::{json, Value};

use espir_core::REQUIRED_TOP_LEVEL_KEYS;

use crate::error::HarnessError;
use crate::mutation::Mutation;

/// JSON pointer to the protocol of the first button in the tree.
pub const FIRST_BUTTON_PROTOCOL: &str = "/homes/0/rooms/0/devices/0/remotes/0/buttons/0/protocol";

/// A `schema_version` the validator must refuse.
pub const UNSUPPORTED_SCHEMA_VERSION: u64 = 2;

/// A protocol literal outside the enum.
pub const INVALID_PROTOCOL: &str = "INVALID";

/// A labeled, deliberately invalid document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NegativeCase {
    pub label: String,
    pub document: Value,
}

/// Derive every negative case from `baseline`, in a fixed order.
///
/// # Errors
///
/// Returns [`HarnessError::BaselineShape`] if the baseline lacks a node a
/// case must corrupt (a root object, `schema_version`, or a first button).
pub fn negative_cases(baseline: &Value) -> Result<Vec<NegativeCase>, HarnessError> {
    let mut cases = Vec::with_capacity(REQUIRED_TOP_LEVEL_KEYS.len() + 2);

    for key in REQUIRED_TOP_LEVEL_KEYS {
        cases.push(NegativeCase {
            label: format!("missing_{key}"),
            document: Mutation::DropTop { key }.applied_to(baseline),
        });
    }

    cases.push(NegativeCase {
        label: "unsupported_schema".to_string(),
        document: replaced(
            baseline,
            "/schema_version",
            json!(UNSUPPORTED_SCHEMA_VERSION),
            "unsupported_schema",
        )?,
    });

    cases.push(NegativeCase {
        label: "invalid_protocol".to_string(),
        document: replaced(
            baseline,
            FIRST_BUTTON_PROTOCOL,
            json!(INVALID_PROTOCOL),
            "invalid_protocol",
        )?,
    });

    Ok(cases)
}

/// A deep copy of `baseline` with the node at `pointer` replaced.
fn replaced(
    baseline: &Value,
    pointer: &str,
    value: Value,
    label: &str,
) -> Result<Value, HarnessError> {
    let mut mutant = baseline.clone();
    let slot = mutant
        .pointer_mut(pointer)
        .ok_or_else(|| HarnessError::BaselineShape {
            label: label.to_string(),
            pointer: pointer.to_string(),
        })?;
    *slot = value;
    Ok(mutant)
}
