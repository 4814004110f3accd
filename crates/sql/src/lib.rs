//! An in-memory SELECT engine for the data explorer.
//!
//! The engine executes a constrained query language — filtering, a single
//! equi-join, grouping with COUNT/SUM/AVG/MIN/MAX, ordering and pagination —
//! over caller-supplied tables of loosely-typed rows. Queries are parsed by
//! a hand-written lexer and recursive-descent parser into an explicit AST,
//! then run synchronously against a read-only table store.
//!
//! Only four failures exist: a non-SELECT statement, a missing FROM clause,
//! an unknown table, and an unsupported join condition. Malformed clause
//! bodies degrade permissively instead of failing; see the parser module.

mod engine;
mod error;
mod execution;
pub mod parsing;
mod types;

pub use engine::QueryEngine;
pub use error::{Error, Result};
pub use types::{ResultSet, Row, Tables, Value};
