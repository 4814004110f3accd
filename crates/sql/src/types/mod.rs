//! Core data types shared across parsing and execution.

pub mod value;

pub use value::{ResultSet, Row, Tables, Value};
