//! Abstract syntax tree for the supported query language.
//!
//! One statement kind exists: SELECT over a single table, optionally joined
//! to a second. The tree is built per call, consumed by the executor and
//! dropped; nothing here is retained between queries.

use crate::types::Value;

/// A parsed SELECT statement, one field per clause.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    /// The SELECT list. Items the parser could not recognize are absent.
    pub select: Vec<SelectItem>,
    /// FROM: the table to read.
    pub table: String,
    /// An optional alias for the FROM table.
    pub alias: Option<String>,
    /// At most one equi-join against a second table.
    pub join: Option<JoinClause>,
    /// WHERE: one comparison, or None to match every row. A body that is
    /// not one of the supported forms also becomes None.
    pub predicate: Option<Predicate>,
    /// GROUP BY: grouping column names.
    pub group_by: Vec<String>,
    /// HAVING: filter over aggregated rows, same forms as WHERE.
    pub having: Option<Predicate>,
    /// ORDER BY: sort field and direction.
    pub order_by: Option<OrderBy>,
    /// LIMIT: maximum number of rows to return.
    pub limit: Option<usize>,
}

/// One item of the SELECT list.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectItem {
    /// `*`: every column.
    All,
    /// A plain column, with an optional `AS` alias.
    Column { name: String, alias: Option<String> },
    /// An aggregate call over a column, or `*` for COUNT.
    Aggregate {
        func: AggregateFunc,
        field: String,
        alias: Option<String>,
    },
}

/// The supported aggregate functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFunc {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl AggregateFunc {
    /// Maps a function name to an aggregate, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name.to_lowercase().as_str() {
            "count" => Self::Count,
            "sum" => Self::Sum,
            "avg" => Self::Avg,
            "min" => Self::Min,
            "max" => Self::Max,
            _ => return None,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Sum => "sum",
            Self::Avg => "avg",
            Self::Min => "min",
            Self::Max => "max",
        }
    }

    /// The output column name used when no alias is given: `count_field`,
    /// `sum_field`, …; `*` becomes `all`.
    pub fn default_output_name(&self, field: &str) -> String {
        if field == "*" {
            format!("{}_all", self.name())
        } else {
            format!("{}_{}", self.name(), field)
        }
    }
}

/// A single-comparison predicate (WHERE or HAVING body).
///
/// These are the only recognized forms; a clause holds exactly one of them.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `field LIKE 'pattern'` — `%` at either end selects substring, prefix
    /// or suffix matching; a bare pattern is an exact match.
    Like { field: String, pattern: String },
    /// `field > number`
    GreaterThan { field: String, value: f64 },
    /// `field < number`
    LessThan { field: String, value: f64 },
    /// `field = 'string'` or `field = number`
    Equal { field: String, value: Value },
}

/// The single supported join: `FROM A [AS a] JOIN B [AS b] ON a.f1 = b.f2`.
/// Qualifiers are resolved during parsing, so the fields here are already
/// assigned to their sides.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    /// The right-hand table name.
    pub table: String,
    /// An optional alias for the right-hand table.
    pub alias: Option<String>,
    /// The join column of the FROM (left) table.
    pub left_field: String,
    /// The join column of the joined (right) table.
    pub right_field: String,
}

/// ORDER BY field and direction.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

/// Sort direction; ascending when not written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}
