//! # Checked Field Lookups
//!
//! Every key access on a configuration document goes through one of the
//! lookups in this module. A lookup never panics; it yields a [`Field`]
//! that says whether the key was present with the expected kind, absent,
//! or present with some other kind.
//!
//! A key mapped to `null` is present. Presence-only fields therefore accept
//! `null`, while typed fields report it as a kind mismatch.

use serde_json::{Map, Number, Value};

use crate::kind::JsonKind;
use crate::violation::{Violation, ViolationKind};

/// Outcome of looking up one key in a JSON object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Field<T> {
    /// The key exists and its value has the expected kind.
    Present(T),
    /// The key does not exist.
    Missing,
    /// The key exists but its value has a different kind.
    WrongType { expected: JsonKind, found: JsonKind },
}

impl<T> Field<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// The value if present with the right kind.
    pub fn present(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            _ => None,
        }
    }

    /// Turn the outcome into a `Result`, attributing failures to `path`.
    ///
    /// `path` is the JSON pointer of the field itself, not of its parent.
    pub fn require(self, path: impl Into<String>) -> Result<T, Violation> {
        match self {
            Self::Present(value) => Ok(value),
            Self::Missing => Err(Violation::new(path, ViolationKind::MissingKey)),
            Self::WrongType { expected, found } => {
                Err(Violation::new(path, ViolationKind::WrongType { expected, found }))
            }
        }
    }
}

fn typed<'a, T>(
    obj: &'a Map<String, Value>,
    key: &str,
    expected: JsonKind,
    extract: impl FnOnce(&'a Value) -> Option<T>,
) -> Field<T> {
    match obj.get(key) {
        None => Field::Missing,
        Some(value) => match extract(value) {
            Some(v) => Field::Present(v),
            None => Field::WrongType {
                expected,
                found: JsonKind::of(value),
            },
        },
    }
}

/// Presence-only lookup: any value, including `null`, counts.
pub fn any<'a>(obj: &'a Map<String, Value>, key: &str) -> Field<&'a Value> {
    match obj.get(key) {
        Some(value) => Field::Present(value),
        None => Field::Missing,
    }
}

/// Integer lookup. Floats and booleans are rejected.
pub fn integer<'a>(obj: &'a Map<String, Value>, key: &str) -> Field<&'a Number> {
    typed(obj, key, JsonKind::Integer, |v| match v {
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(n),
        _ => None,
    })
}

/// Boolean lookup. `0` and `1` are rejected.
pub fn boolean(obj: &Map<String, Value>, key: &str) -> Field<bool> {
    typed(obj, key, JsonKind::Bool, Value::as_bool)
}

pub fn string<'a>(obj: &'a Map<String, Value>, key: &str) -> Field<&'a str> {
    typed(obj, key, JsonKind::String, Value::as_str)
}

pub fn object<'a>(obj: &'a Map<String, Value>, key: &str) -> Field<&'a Map<String, Value>> {
    typed(obj, key, JsonKind::Object, Value::as_object)
}

/// Sequence lookup. An empty mapping is not a sequence.
pub fn array<'a>(obj: &'a Map<String, Value>, key: &str) -> Field<&'a [Value]> {
    typed(obj, key, JsonKind::Array, |v| v.as_array().map(Vec::as_slice))
}

/// Append a key segment to a JSON pointer, escaping per RFC 6901.
pub fn pointer_join(base: &str, segment: &str) -> String {
    let escaped = segment.replace('~', "~0").replace('/', "~1");
    format!("{base}/{escaped}")
}
