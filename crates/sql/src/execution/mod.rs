//! Query execution: filtering, joining, grouping and ordering of rows.

pub(crate) mod aggregate;
pub(crate) mod join;
pub(crate) mod predicate;
pub(crate) mod sort;
