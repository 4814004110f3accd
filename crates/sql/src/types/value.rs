//! Scalar values and row containers.
//!
//! Rows are loosely-typed, JSON-shaped data supplied by the caller: an
//! insertion-ordered mapping from column name to a scalar. The column set is
//! whatever the first row of a table happens to carry; the engine never
//! enforces a schema and field lookups return options instead of failing.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A single row: column name to scalar value, in insertion order.
///
/// Order is observable — `*` projection, join re-keying and serialized
/// output all preserve it.
pub type Row = IndexMap<String, Value>;

/// The table store: caller-supplied, read-only for the duration of a query.
pub type Tables = HashMap<String, Vec<Row>>;

/// A scalar cell value.
///
/// `PartialEq` is strict: no cross-variant coercion, so `Integer(1)` and
/// `Float(1.0)` are distinct. The join relies on this; comparisons that
/// should coerce go through [`Value::as_f64`] instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Str(String),
}

impl Value {
    /// Builds a numeric value from an f64, collapsing integral results back
    /// to `Integer` so aggregates over integer data stay integers.
    pub fn number(n: f64) -> Self {
        if n.is_finite() && n.fract() == 0.0 && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
            Value::Integer(n as i64)
        } else {
            Value::Float(n)
        }
    }

    /// Numeric coercion: numbers pass through, strings are parsed.
    /// Booleans and nulls are not numbers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Str(s) => s.trim().parse().ok(),
            Value::Bool(_) | Value::Null => None,
        }
    }

    /// Whether the value is a number variant (no string coercion).
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// Stringification used for group keys and lexicographic ordering.
/// Null renders empty so absent and null fields collate together.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{}", v),
            Value::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// The result of executing a query.
///
/// `total_count` is the row count after filtering (WHERE, and HAVING when
/// grouping) but before LIMIT, so a caller can render "N rows (showing M)".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSet {
    pub rows: Vec<Row>,
    pub total_count: usize,
}
