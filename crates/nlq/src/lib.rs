//! Rule-based natural-language translation for the data explorer.
//!
//! Maps free-text questions ("how many customers do we have?") to query
//! strings the explorer's engine executes. Translation is ordered pattern
//! matching over a fixed rule catalogue plus keyword dictionaries for table
//! and column inference — no parsing, no models, no understanding. It is a
//! total function: anything it cannot place degrades to a sensible default
//! query, and the engine re-validates whatever comes out.

mod keywords;
mod rules;
mod translator;

pub use rules::{rules, Rule};
pub use translator::translate;
