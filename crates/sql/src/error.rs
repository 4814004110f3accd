//! Error types for the query engine

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// The closed set of failures query execution can surface.
///
/// Everything else the engine encounters — a WHERE body it cannot parse, an
/// aggregate expression it does not recognize, a non-numeric LIMIT — is
/// recovered permissively rather than reported, so callers only ever see
/// these four conditions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The statement is not a SELECT.
    #[error("only SELECT queries are supported")]
    UnsupportedQueryKind,

    /// The statement has no resolvable FROM clause.
    #[error("query has no FROM clause")]
    MissingTable,

    /// The named table is absent from the table store.
    #[error("table not found: {0}")]
    UnknownTable(String),

    /// A JOIN is present but is not a single equi-join on two named tables.
    #[error("unsupported join condition: {0}")]
    UnsupportedJoinCondition(String),
}
