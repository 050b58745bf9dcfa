//! # Mutation Operations
//!
//! Structural corruptions applied to a deep copy of the baseline. Each
//! operation edits the copy it is given and nothing else; callers clone
//! the baseline first.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use serde_json::{Map, Value};

use espir_core::REQUIRED_TOP_LEVEL_KEYS;

/// The three randomized mutation operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationKind {
    /// Remove one required top-level key.
    DropTop,
    /// Replace `mqtt.port` with its string representation.
    FlipType,
    /// Replace `homes` with an empty mapping.
    ClearArray,
}

impl MutationKind {
    pub const ALL: [MutationKind; 3] = [Self::DropTop, Self::FlipType, Self::ClearArray];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DropTop => "drop_top",
            Self::FlipType => "flip_type",
            Self::ClearArray => "clear_array",
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully determined mutation, ready to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Mutation {
    DropTop { key: &'static str },
    FlipType,
    ClearArray,
}

impl Mutation {
    /// Draw a mutation: the kind uniformly from [`MutationKind::ALL`], then,
    /// for `drop_top` only, the key uniformly from the required keys.
    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let kind = MutationKind::ALL
            .choose(rng)
            .copied()
            .unwrap_or(MutationKind::FlipType);
        match kind {
            MutationKind::DropTop => Self::DropTop {
                key: REQUIRED_TOP_LEVEL_KEYS
                    .choose(rng)
                    .copied()
                    .unwrap_or(REQUIRED_TOP_LEVEL_KEYS[0]),
            },
            MutationKind::FlipType => Self::FlipType,
            MutationKind::ClearArray => Self::ClearArray,
        }
    }

    pub fn kind(&self) -> MutationKind {
        match self {
            Self::DropTop { .. } => MutationKind::DropTop,
            Self::FlipType => MutationKind::FlipType,
            Self::ClearArray => MutationKind::ClearArray,
        }
    }

    /// Apply to a document in place. A non-object root is left untouched.
    pub fn apply(&self, document: &mut Value) {
        match self {
            Self::DropTop { key } => {
                if let Some(root) = document.as_object_mut() {
                    root.remove(*key);
                }
            }
            Self::FlipType => {
                if let Some(port) = document.pointer_mut("/mqtt/port") {
                    let text = match &*port {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    *port = Value::String(text);
                }
            }
            Self::ClearArray => {
                if let Some(root) = document.as_object_mut() {
                    root.insert("homes".to_string(), Value::Object(Map::new()));
                }
            }
        }
    }

    /// A mutated deep copy of `baseline`.
    pub fn applied_to(&self, baseline: &Value) -> Value {
        let mut mutant = baseline.clone();
        self.apply(&mut mutant);
        mutant
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DropTop { key } => write!(f, "drop_top({key})"),
            other => f.write_str(other.kind().as_str()),
        }
    }
}
