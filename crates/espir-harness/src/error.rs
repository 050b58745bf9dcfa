//! # Harness Errors
//!
//! A harness run either confirms the validator or stops at the first case
//! that behaved unexpectedly. Each variant names that case.

use thiserror::Error;

use espir_core::ValidationViolations;

use crate::mutation::Mutation;

#[derive(Error, Debug)]
pub enum HarnessError {
    /// The known-valid baseline was rejected.
    #[error("baseline config must pass ({engine} engine):\n{violations}")]
    BaselineRejected {
        engine: String,
        violations: ValidationViolations,
    },

    /// A labeled negative case was accepted.
    #[error("expected invalid: {label}")]
    NegativeCaseAccepted { label: String },

    /// A fuzz mutant was accepted.
    #[error("fuzz mutation should not pass at iteration {iteration} ({mutation})")]
    FuzzMutantAccepted { iteration: usize, mutation: Mutation },

    /// The baseline lacks a node that a negative case must corrupt.
    #[error("cannot derive negative case {label}: baseline has no value at {pointer}")]
    BaselineShape { label: String, pointer: String },
}
