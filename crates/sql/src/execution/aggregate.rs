//! Grouping and aggregation.
//!
//! Rows are partitioned by the stringified GROUP BY key (groups surface in
//! first-seen order) and each SELECT item contributes one output column per
//! group. With aggregates but no GROUP BY the whole input is one group, so
//! `SELECT COUNT(*) FROM t` yields one row even over an empty table.

use indexmap::IndexMap;

use crate::parsing::ast::{AggregateFunc, SelectItem};
use crate::types::{Row, Value};

/// Separator between stringified key parts of a composite group key.
const KEY_SEPARATOR: char = '|';

/// Partitions the filtered rows and computes one output row per group.
pub fn group_and_aggregate(rows: &[&Row], group_by: &[String], select: &[SelectItem]) -> Vec<Row> {
    let mut groups: IndexMap<String, Vec<&Row>> = IndexMap::new();
    if group_by.is_empty() {
        // Aggregates without GROUP BY: a single group over all input.
        groups.insert(String::new(), rows.to_vec());
    } else {
        for row in rows {
            let key = group_key(row, group_by);
            groups.entry(key).or_default().push(row);
        }
    }
    groups
        .values()
        .map(|group| output_row(group, group_by, select))
        .collect()
}

/// The group key: each GROUP BY value stringified, joined by a separator.
/// Absent fields stringify empty, collating with explicit nulls.
fn group_key(row: &Row, group_by: &[String]) -> String {
    group_by
        .iter()
        .map(|column| {
            row.get(column)
                .map(|value| value.to_string())
                .unwrap_or_default()
        })
        .collect::<Vec<_>>()
        .join(&KEY_SEPARATOR.to_string())
}

/// Builds one output row for a group. The group's first row (in table
/// order) is the representative that supplies non-aggregated values.
fn output_row(group: &[&Row], group_by: &[String], select: &[SelectItem]) -> Row {
    let representative = group.first();
    let mut out = Row::new();
    for item in select {
        match item {
            SelectItem::All => {
                if let Some(representative) = representative {
                    for (column, value) in representative.iter() {
                        out.insert(column.clone(), value.clone());
                    }
                }
            }
            // A bare column only carries through when it is part of the
            // grouping key; anything else has no single value per group and
            // is omitted.
            SelectItem::Column { name, alias } => {
                if group_by.contains(name) {
                    let value = representative
                        .and_then(|row| row.get(name))
                        .cloned()
                        .unwrap_or(Value::Null);
                    out.insert(alias.clone().unwrap_or_else(|| name.clone()), value);
                }
            }
            SelectItem::Aggregate { func, field, alias } => {
                let name = alias
                    .clone()
                    .unwrap_or_else(|| func.default_output_name(field));
                out.insert(name, aggregate_value(*func, field, group));
            }
        }
    }
    out
}

/// Computes one aggregate over a group. Values that fail numeric coercion
/// are skipped; an empty numeric set yields SUM 0, AVG 0 and MIN/MAX null.
fn aggregate_value(func: AggregateFunc, field: &str, group: &[&Row]) -> Value {
    match func {
        AggregateFunc::Count if field == "*" => Value::Integer(group.len() as i64),
        AggregateFunc::Count => {
            let count = group
                .iter()
                .filter(|row| row.get(field).is_some_and(|value| !value.is_null()))
                .count();
            Value::Integer(count as i64)
        }
        AggregateFunc::Sum => Value::number(numeric_values(field, group).sum()),
        AggregateFunc::Avg => {
            let numbers: Vec<f64> = numeric_values(field, group).collect();
            if numbers.is_empty() {
                Value::Integer(0)
            } else {
                Value::number(numbers.iter().sum::<f64>() / numbers.len() as f64)
            }
        }
        AggregateFunc::Min => numeric_values(field, group)
            .reduce(f64::min)
            .map(Value::number)
            .unwrap_or(Value::Null),
        AggregateFunc::Max => numeric_values(field, group)
            .reduce(f64::max)
            .map(Value::number)
            .unwrap_or(Value::Null),
    }
}

/// The group's values for a field that coerce to numbers, in row order.
fn numeric_values<'a>(field: &'a str, group: &'a [&'a Row]) -> impl Iterator<Item = f64> + 'a {
    group
        .iter()
        .filter_map(move |row| row.get(field))
        .filter_map(Value::as_f64)
}
