//! The ordered translation rule catalogue.
//!
//! Priority is the slice order and nothing else: the first rule whose
//! pattern matches the lower-cased input renders the query. Keeping the
//! catalogue as one explicit list makes the precedence visible and lets
//! tests pin it down directly.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::keywords::infer_column;

/// One translation rule: a pattern and a template rendering a query from
/// the match and the resolved table.
pub struct Rule {
    /// Short identifier, used in logs and tests.
    pub name: &'static str,
    pub pattern: Regex,
    /// Renders the query. The table argument is already resolved from the
    /// caller's hint or keyword inference.
    pub template: fn(&Captures, &str) -> String,
}

/// The catalogue, most specific rules first.
pub fn rules() -> &'static [Rule] {
    &RULES
}

static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule {
            name: "join-customers-orders",
            pattern: pattern(
                r"customers?\s+(?:with|and)\s+(?:their\s+)?orders?|orders?\s+(?:with|and)\s+(?:their\s+)?customers?",
            ),
            template: |_, _| {
                "SELECT * FROM customers JOIN orders ON customers.id = orders.customer_id"
                    .to_owned()
            },
        },
        Rule {
            name: "count",
            pattern: pattern(r"\b(?:how many|count of|number of)\b"),
            template: |_, table| format!("SELECT COUNT(*) AS count FROM {}", table),
        },
        Rule {
            name: "aggregate-per-group",
            pattern: pattern(
                r"\b(average|avg|mean|total|sum|minimum|min|lowest|maximum|max|highest)\s+(?:of\s+)?(\w+)\s+(?:per|by|for each)\s+(\w+)",
            ),
            template: |caps, table| {
                let (func, prefix) = aggregate_for(&caps[1]);
                let column = resolve_column(table, &caps[2]);
                let group = resolve_column(table, &caps[3]);
                format!(
                    "SELECT {group}, {func}({column}) AS {prefix}_{column} FROM {table} GROUP BY {group}"
                )
            },
        },
        Rule {
            name: "aggregate",
            pattern: pattern(
                r"\b(average|avg|mean|total|sum|minimum|min|lowest|maximum|max|highest)\s+(?:of\s+)?(\w+)",
            ),
            template: |caps, table| {
                let (func, prefix) = aggregate_for(&caps[1]);
                let column = resolve_column(table, &caps[2]);
                format!("SELECT {func}({column}) AS {prefix}_{column} FROM {table}")
            },
        },
        Rule {
            name: "top-n",
            pattern: pattern(r"\b(?:top|first|biggest|largest)\s+(\d+)(?:\s+\w+)?(?:\s+by\s+(\w+))?"),
            template: |caps, table| {
                let limit = &caps[1];
                let column = caps
                    .get(2)
                    .map(|m| resolve_column(table, m.as_str()))
                    .unwrap_or_else(|| "id".to_owned());
                format!("SELECT * FROM {table} ORDER BY {column} DESC LIMIT {limit}")
            },
        },
        Rule {
            name: "named-like",
            pattern: pattern(r"\b(?:named|called)\s+['\x22]?(\w+)"),
            template: |caps, table| {
                format!("SELECT * FROM {} WHERE name LIKE '%{}%'", table, &caps[1])
            },
        },
        Rule {
            name: "older-than",
            pattern: pattern(r"\bolder than\s+(\d+)"),
            template: |caps, table| {
                format!("SELECT * FROM {} WHERE age > {}", table, &caps[1])
            },
        },
        Rule {
            name: "greater-than",
            pattern: pattern(
                r"(\w+)\s+(?:over|above|more than|greater than|at least|exceeding)\s+(\d+(?:\.\d+)?)",
            ),
            template: |caps, table| {
                let column = resolve_column(table, &caps[1]);
                format!("SELECT * FROM {} WHERE {} > {}", table, column, &caps[2])
            },
        },
        Rule {
            name: "less-than",
            pattern: pattern(
                r"(\w+)\s+(?:under|below|less than|fewer than|at most)\s+(\d+(?:\.\d+)?)",
            ),
            template: |caps, table| {
                let column = resolve_column(table, &caps[1]);
                format!("SELECT * FROM {} WHERE {} < {}", table, column, &caps[2])
            },
        },
        Rule {
            name: "sorted-by",
            pattern: pattern(r"\b(?:sorted|ordered|ranked)\s+by\s+(\w+)(\s+desc(?:ending)?)?"),
            template: |caps, table| {
                let column = resolve_column(table, &caps[1]);
                let direction = if caps.get(2).is_some() { " DESC" } else { "" };
                format!("SELECT * FROM {table} ORDER BY {column}{direction}")
            },
        },
        Rule {
            name: "located-in",
            pattern: pattern(r"\b(?:living in|located in|based in|from)\s+(\w+)\s*$"),
            template: |caps, table| {
                format!("SELECT * FROM {} WHERE city = '{}'", table, &caps[1])
            },
        },
        Rule {
            name: "list-all",
            pattern: pattern(r"^(?:show|list|display|give|get|fetch|view)\b|\ball\b"),
            template: |_, table| format!("SELECT * FROM {}", table),
        },
    ]
});

fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("rule pattern must compile")
}

/// Maps an aggregation word to the query function and its output prefix.
fn aggregate_for(word: &str) -> (&'static str, &'static str) {
    match word {
        "average" | "avg" | "mean" => ("AVG", "avg"),
        "total" | "sum" => ("SUM", "sum"),
        "minimum" | "min" | "lowest" => ("MIN", "min"),
        "maximum" | "max" | "highest" => ("MAX", "max"),
        _ => ("COUNT", "count"),
    }
}

/// Resolves a captured word to a column of the table, falling back to the
/// word itself.
fn resolve_column(table: &str, word: &str) -> String {
    infer_column(table, word)
        .map(str::to_owned)
        .unwrap_or_else(|| word.to_owned())
}
