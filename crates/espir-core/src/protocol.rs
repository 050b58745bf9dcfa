//! # IR Protocol
//!
//! The closed set of infrared encodings a button may declare. Matching is
//! exact and case-sensitive: `"NEC"` is a protocol, `"nec"` is not.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Infrared signal encodings supported by the firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IrProtocol {
    #[serde(rename = "NEC")]
    Nec,
    #[serde(rename = "RC5")]
    Rc5,
    #[serde(rename = "Sony")]
    Sony,
    /// Raw pulse timings captured by the learner.
    #[serde(rename = "RAW")]
    Raw,
}

/// Returned when a string names no known protocol.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown IR protocol: {0:?}")]
pub struct UnknownProtocol(pub String);

impl IrProtocol {
    pub const ALL: [IrProtocol; 4] = [Self::Nec, Self::Rc5, Self::Sony, Self::Raw];

    /// The literal used in configuration documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nec => "NEC",
            Self::Rc5 => "RC5",
            Self::Sony => "Sony",
            Self::Raw => "RAW",
        }
    }
}

impl fmt::Display for IrProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IrProtocol {
    type Err = UnknownProtocol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEC" => Ok(Self::Nec),
            "RC5" => Ok(Self::Rc5),
            "Sony" => Ok(Self::Sony),
            "RAW" => Ok(Self::Raw),
            other => Err(UnknownProtocol(other.to_string())),
        }
    }
}
