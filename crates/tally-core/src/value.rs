//! Stored values.
//!
//! The store holds a closed set of value kinds instead of type-erased payloads,
//! so a reader asking for the wrong kind gets a `TypeMismatch` error rather than
//! a bad cast.

use bytes::Bytes;
use serde::Serialize;

use crate::error::{Result, TallyError};

/// A value held by a [`KvStore`](crate::store::KvStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Int(i64),
    Text(String),
    Bytes(Bytes),
}

impl Value {
    /// Short name of the variant, used in errors and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Decode as an integer, reporting which key held the wrong kind.
    pub fn expect_int(&self, key: &str) -> Result<i64> {
        self.as_int().ok_or_else(|| TallyError::TypeMismatch {
            key: key.to_string(),
            expected: "int",
            found: self.kind(),
        })
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<Bytes> for Value {
    fn from(b: Bytes) -> Self {
        Value::Bytes(b)
    }
}
