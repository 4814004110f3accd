//! Nested-loop equi-join of two in-memory tables.
//!
//! For every row of the left table, every row of the right table is
//! examined and a combined row emitted when the join columns compare equal
//! under strict value equality (no numeric or string coercion; a row
//! missing its join column never matches). Combined rows namespace every
//! column as `<table>_<column>`, left side first, so shared column names
//! cannot collide.
//!
//! O(|left|·|right|) is deliberate: the engine targets demo-scale tables of
//! tens of rows, and the quadratic scan keeps the join free of any index or
//! hashing machinery.

use tracing::trace;

use crate::types::Row;

/// Computes the combined row set. WHERE/ORDER BY/LIMIT are applied by the
/// caller afterwards, against the namespaced column names.
pub fn nested_loop(
    left_table: &str,
    left_rows: &[Row],
    right_table: &str,
    right_rows: &[Row],
    left_field: &str,
    right_field: &str,
) -> Vec<Row> {
    let mut combined = Vec::new();
    for left in left_rows {
        let Some(left_value) = left.get(left_field) else {
            continue;
        };
        for right in right_rows {
            let Some(right_value) = right.get(right_field) else {
                continue;
            };
            if left_value == right_value {
                let mut row = Row::new();
                for (column, value) in left {
                    row.insert(format!("{}_{}", left_table, column), value.clone());
                }
                for (column, value) in right {
                    row.insert(format!("{}_{}", right_table, column), value.clone());
                }
                combined.push(row);
            }
        }
    }
    trace!(
        left = left_rows.len(),
        right = right_rows.len(),
        combined = combined.len(),
        "nested-loop join"
    );
    combined
}
