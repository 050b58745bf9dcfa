//! # espir-harness — Negative and Fuzz Testing for Configuration Validators
//!
//! Checks that a [`DocumentValidator`](espir_schema::DocumentValidator)
//! accepts a known-valid baseline and rejects every deliberately broken
//! copy of it.
//!
//! ## Phases
//!
//! - **Baseline** — the unmodified document must be accepted.
//! - **Negative cases** ([`negative`]) — labeled mutants, each invalid by
//!   construction, must all be rejected.
//! - **Fuzz** ([`fuzz`]) — a fixed number of mutants drawn from a seeded
//!   PRNG must all be rejected.
//!
//! [`Harness`] runs the phases in order and stops at the first surprise.
//!
//! ## Crate Policy
//!
//! - The baseline is never modified; every mutant is a deep copy.
//! - The PRNG is owned by the harness that draws from it. A seed fully
//!   determines a run.
//! - Library code logs through `tracing` and never installs a subscriber.

pub mod config;
pub mod error;
pub mod fuzz;
pub mod mutation;
pub mod negative;
pub mod runner;

pub use config::{HarnessConfig, DEFAULT_ITERATIONS, DEFAULT_SEED};
pub use error::HarnessError;
pub use fuzz::{FuzzHarness, FuzzReport};
pub use mutation::{Mutation, MutationKind};
pub use negative::{negative_cases, NegativeCase};
pub use runner::{Harness, HarnessReport};
