//! # Seeded Fuzz Harness
//!
//! Deterministic random mutation testing. Each iteration deep-copies the
//! baseline, draws one [`Mutation`] from the harness's own PRNG, applies it,
//! and requires the validator to reject the result.
//!
//! The PRNG is owned by the harness and consumed strictly in sequence, so a
//! given seed always yields the same mutation sequence and the same
//! outcomes. There is no global RNG.

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;
use serde_json::Value;

use espir_schema::DocumentValidator;

use crate::config::HarnessConfig;
use crate::error::HarnessError;
use crate::mutation::{Mutation, MutationKind};

/// Drives a bounded sequence of randomized mutants through a validator.
#[derive(Debug, Clone)]
pub struct FuzzHarness<R = Pcg32> {
    rng: R,
    seed: Option<u64>,
    iterations: usize,
}

impl FuzzHarness<Pcg32> {
    /// A harness whose PRNG is seeded from `seed`.
    pub fn seeded(seed: u64, iterations: usize) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            seed: Some(seed),
            iterations,
        }
    }

    pub fn from_config(config: &HarnessConfig) -> Self {
        Self::seeded(config.seed, config.iterations)
    }
}

impl<R: Rng> FuzzHarness<R> {
    /// A harness drawing from a caller-supplied PRNG.
    pub fn with_rng(rng: R, iterations: usize) -> Self {
        Self {
            rng,
            seed: None,
            iterations,
        }
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Draw the next mutation, advancing the PRNG.
    pub fn next_mutation(&mut self) -> Mutation {
        Mutation::draw(&mut self.rng)
    }

    /// Run every iteration against `validator`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::FuzzMutantAccepted`] at the first mutant the
    /// validator accepts.
    pub fn run(
        mut self,
        baseline: &Value,
        validator: &dyn DocumentValidator,
    ) -> Result<FuzzReport, HarnessError> {
        let mut mutations = Vec::with_capacity(self.iterations);

        for iteration in 0..self.iterations {
            let mutation = self.next_mutation();
            let mutant = mutation.applied_to(baseline);

            if validator.validate(&mutant) {
                tracing::debug!(iteration, mutation = %mutation, "fuzz mutant accepted");
                return Err(HarnessError::FuzzMutantAccepted {
                    iteration,
                    mutation,
                });
            }

            tracing::trace!(iteration, mutation = %mutation, "fuzz mutant rejected");
            mutations.push(mutation);
        }

        let mut counts = BTreeMap::new();
        for mutation in &mutations {
            *counts.entry(mutation.kind()).or_insert(0) += 1;
        }

        Ok(FuzzReport {
            seed: self.seed,
            mutations,
            counts,
        })
    }
}

/// Outcome of a completed fuzz run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FuzzReport {
    /// The seed, when the harness was built from one.
    pub seed: Option<u64>,
    /// Every mutation applied, in iteration order.
    pub mutations: Vec<Mutation>,
    /// Iterations per mutation kind. Kinds never drawn are absent.
    pub counts: BTreeMap<MutationKind, usize>,
}

impl FuzzReport {
    pub fn iterations(&self) -> usize {
        self.mutations.len()
    }

    /// How many iterations used the given kind.
    pub fn count(&self, kind: MutationKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }
}
