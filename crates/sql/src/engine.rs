//! The query engine entry point.
//!
//! One engine borrows one table store for its lifetime; every call to
//! [`QueryEngine::execute`] parses, runs and discards a statement with no
//! state carried between calls. The store is never mutated, so concurrent
//! executions against the same store are safe as long as nothing external
//! writes to it.

use tracing::debug;

use crate::error::{Error, Result};
use crate::execution::{aggregate, join, predicate, sort};
use crate::parsing::Parser;
use crate::parsing::ast::{JoinClause, SelectItem, SelectStatement};
use crate::types::{ResultSet, Row, Tables};

pub struct QueryEngine<'a> {
    tables: &'a Tables,
}

impl<'a> QueryEngine<'a> {
    pub fn new(tables: &'a Tables) -> Self {
        Self { tables }
    }

    /// Executes a query and returns its result set.
    ///
    /// Clauses apply in WHERE → GROUP BY → HAVING → ORDER BY → LIMIT order;
    /// `total_count` reflects the row count before LIMIT.
    pub fn execute(&self, query: &str) -> Result<ResultSet> {
        let statement = Parser::parse(query)?;
        debug!(
            table = %statement.table,
            join = statement.join.is_some(),
            "executing query"
        );

        let mut rows = match &statement.join {
            Some(join) => self.execute_join(&statement, join)?,
            None => self.execute_single(&statement)?,
        };

        if let Some(order) = &statement.order_by {
            sort::order_rows(&mut rows, &order.field, order.direction);
        }

        let total_count = rows.len();
        if let Some(limit) = statement.limit {
            rows.truncate(limit);
        }
        Ok(ResultSet { rows, total_count })
    }

    /// The single-table path: filter, then either group/aggregate + HAVING
    /// or plain projection.
    fn execute_single(&self, statement: &SelectStatement) -> Result<Vec<Row>> {
        let table = self.lookup(&statement.table)?;
        let filtered: Vec<&Row> = table
            .iter()
            .filter(|row| predicate::matches(statement.predicate.as_ref(), row))
            .collect();

        let wants_aggregation = !statement.group_by.is_empty()
            || statement
                .select
                .iter()
                .any(|item| matches!(item, SelectItem::Aggregate { .. }));

        if wants_aggregation {
            let mut grouped =
                aggregate::group_and_aggregate(&filtered, &statement.group_by, &statement.select);
            grouped.retain(|row| predicate::matches(statement.having.as_ref(), row));
            Ok(grouped)
        } else {
            Ok(project(&filtered, &statement.select))
        }
    }

    /// The join path: combine both tables, then filter. WHERE (and ORDER
    /// BY/LIMIT, applied by the caller) see the namespaced column names.
    fn execute_join(&self, statement: &SelectStatement, join: &JoinClause) -> Result<Vec<Row>> {
        let left = self.lookup(&statement.table)?;
        let right = self.lookup(&join.table)?;
        let combined = join::nested_loop(
            &statement.table,
            left,
            &join.table,
            right,
            &join.left_field,
            &join.right_field,
        );
        let filtered: Vec<&Row> = combined
            .iter()
            .filter(|row| predicate::matches(statement.predicate.as_ref(), row))
            .collect();
        Ok(project(&filtered, &statement.select))
    }

    fn lookup(&self, name: &str) -> Result<&'a Vec<Row>> {
        self.tables
            .get(name)
            .ok_or_else(|| Error::UnknownTable(name.to_owned()))
    }
}

/// Non-aggregate projection. An empty SELECT list behaves like `*`; a field
/// absent from a row is omitted from that row's output.
fn project(rows: &[&Row], select: &[SelectItem]) -> Vec<Row> {
    if select.is_empty() {
        return rows.iter().map(|row| (*row).clone()).collect();
    }
    rows.iter()
        .map(|row| {
            let mut out = Row::new();
            for item in select {
                match item {
                    SelectItem::All => {
                        for (column, value) in row.iter() {
                            out.insert(column.clone(), value.clone());
                        }
                    }
                    SelectItem::Column { name, alias } => {
                        if let Some(value) = row.get(name) {
                            out.insert(
                                alias.clone().unwrap_or_else(|| name.clone()),
                                value.clone(),
                            );
                        }
                    }
                    // Aggregates never reach this path.
                    SelectItem::Aggregate { .. } => {}
                }
            }
            out
        })
        .collect()
}
