//! Result ordering.
//!
//! Two values order numerically only when both are number variants;
//! otherwise both sides are stringified and compared lexicographically.
//! The sort is stable, so rows with equal keys keep their prior order and
//! output stays deterministic.

use std::cmp::Ordering;

use crate::parsing::ast::Direction;
use crate::types::{Row, Value};

/// Sorts rows in place by the named field.
pub fn order_rows(rows: &mut [Row], field: &str, direction: Direction) {
    rows.sort_by(|a, b| {
        let ordering = compare(a.get(field), b.get(field));
        match direction {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    });
}

fn compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    if let (Some(a), Some(b)) = (a, b) {
        if a.is_number() && b.is_number() {
            let x = a.as_f64().unwrap_or(0.0);
            let y = b.as_f64().unwrap_or(0.0);
            return x.partial_cmp(&y).unwrap_or(Ordering::Equal);
        }
    }
    let a = a.map(ToString::to_string).unwrap_or_default();
    let b = b.map(ToString::to_string).unwrap_or_default();
    a.cmp(&b)
}
