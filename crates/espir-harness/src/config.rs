//! Harness settings.

use serde::{Deserialize, Serialize};

/// Seed used when none is given. Fixed so that every run of the harness
/// draws the same mutation sequence.
pub const DEFAULT_SEED: u64 = 1337;

/// Fuzz iterations per run when none is given.
pub const DEFAULT_ITERATIONS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub seed: u64,
    pub iterations: usize,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            iterations: DEFAULT_ITERATIONS,
        }
    }
}
