//! Remote document shape normalization.
//!
//! # Responsibility
//! - Classify whatever the store returned into one tagged variant.
//! - Provide the two normalizations the repository needs: records for
//!   display, and a dense array for rewriting.
//!
//! # Invariants
//! - Business logic only ever sees `Vec<Value>`; the array-vs-object
//!   duality ends here.
//! - Keyed documents keep the key order the store sent.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Shape of the full remote document.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteDocument {
    /// Empty body or JSON `null`.
    Absent,
    /// Dense array, possibly with `null` holes.
    Sequence(Vec<Value>),
    /// Object mapping store keys to records.
    Keyed(Map<String, Value>),
    /// Any other JSON value (string, number, bool).
    Scalar(Value),
}

impl RemoteDocument {
    /// Parses a raw response body. Blank bodies are treated as absent.
    pub fn parse(body: &str) -> Result<Self, serde_json::Error> {
        if body.trim().is_empty() {
            return Ok(Self::Absent);
        }
        serde_json::from_str(body)
    }

    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Null => Self::Absent,
            Value::Array(items) => Self::Sequence(items),
            Value::Object(map) => Self::Keyed(map),
            other => Self::Scalar(other),
        }
    }

    /// Records for display: `null` entries dropped, keyed values in order.
    ///
    /// A scalar document is returned as a single (malformed) record so the
    /// projection step reports it.
    pub fn into_records(self) -> Vec<Value> {
        match self {
            Self::Absent => Vec::new(),
            Self::Sequence(items) => items.into_iter().filter(|item| !item.is_null()).collect(),
            Self::Keyed(map) => map.into_iter().map(|(_, v)| v).filter(|v| !v.is_null()).collect(),
            Self::Scalar(value) => vec![value],
        }
    }

    /// Array to extend and write back. Anything that is not an array
    /// becomes empty; `null` holes in an array are kept.
    pub fn into_sequence(self) -> Vec<Value> {
        match self {
            Self::Sequence(items) => items,
            Self::Absent | Self::Keyed(_) | Self::Scalar(_) => Vec::new(),
        }
    }
}

impl<'de> Deserialize<'de> for RemoteDocument {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}
