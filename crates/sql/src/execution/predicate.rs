//! Predicate evaluation for WHERE and HAVING bodies.
//!
//! A row with the referenced field absent never matches; a missing
//! predicate (including one the parser could not recognize) matches every
//! row. HAVING runs through the same evaluator, against aggregated rows
//! under their output names.

use crate::parsing::ast::Predicate;
use crate::types::{Row, Value};

/// Returns whether the row satisfies the predicate.
pub fn matches(predicate: Option<&Predicate>, row: &Row) -> bool {
    let Some(predicate) = predicate else {
        return true;
    };
    match predicate {
        Predicate::Like { field, pattern } => row
            .get(field)
            .map(|value| like_match(&value.to_string(), pattern))
            .unwrap_or(false),
        Predicate::GreaterThan { field, value } => row
            .get(field)
            .and_then(Value::as_f64)
            .map(|n| n > *value)
            .unwrap_or(false),
        Predicate::LessThan { field, value } => row
            .get(field)
            .and_then(Value::as_f64)
            .map(|n| n < *value)
            .unwrap_or(false),
        Predicate::Equal { field, value } => match row.get(field) {
            None => false,
            Some(actual) if value.is_number() => match (actual.as_f64(), value.as_f64()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
            Some(actual) => actual
                .to_string()
                .eq_ignore_ascii_case(&value.to_string()),
        },
    }
}

/// Case-insensitive LIKE matching. `%` is only meaningful at the pattern's
/// ends: `%x%` is a substring test, `%x` a suffix test, `x%` a prefix test,
/// and a bare pattern an exact match.
fn like_match(text: &str, pattern: &str) -> bool {
    let text = text.to_lowercase();
    let pattern = pattern.to_lowercase();
    if let Some(rest) = pattern.strip_prefix('%') {
        match rest.strip_suffix('%') {
            Some(inner) => text.contains(inner),
            None => text.ends_with(rest),
        }
    } else if let Some(prefix) = pattern.strip_suffix('%') {
        text.starts_with(prefix)
    } else {
        text == pattern
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, Value)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn like_patterns() {
        assert!(like_match("John Doe", "%john%"));
        assert!(like_match("John Doe", "john%"));
        assert!(like_match("John Doe", "%doe"));
        assert!(like_match("John Doe", "john doe"));
        assert!(!like_match("John Doe", "doe%"));
        assert!(like_match("anything", "%"));
    }

    #[test]
    fn missing_field_never_matches() {
        let r = row(&[("name", Value::from("Ada"))]);
        let p = Predicate::Equal {
            field: "city".into(),
            value: Value::from("Oslo"),
        };
        assert!(!matches(Some(&p), &r));
    }

    #[test]
    fn no_predicate_matches_all() {
        assert!(matches(None, &row(&[])));
    }

    #[test]
    fn string_equality_is_case_insensitive() {
        let r = row(&[("city", Value::from("Oslo"))]);
        let p = Predicate::Equal {
            field: "city".into(),
            value: Value::from("OSLO"),
        };
        assert!(matches(Some(&p), &r));
    }

    #[test]
    fn numeric_equality_is_exact_and_coercing() {
        let r = row(&[("id", Value::Integer(2))]);
        let p = Predicate::Equal {
            field: "id".into(),
            value: Value::Integer(2),
        };
        assert!(matches(Some(&p), &r));

        // A numeric string on the row side still compares numerically.
        let r = row(&[("id", Value::from("2"))]);
        assert!(matches(Some(&p), &r));

        let p = Predicate::Equal {
            field: "id".into(),
            value: Value::Integer(3),
        };
        let r = row(&[("id", Value::Integer(2))]);
        assert!(!matches(Some(&p), &r));
    }

    #[test]
    fn numeric_comparisons_coerce_both_sides() {
        let r = row(&[("price", Value::from("19.99"))]);
        let gt = Predicate::GreaterThan {
            field: "price".into(),
            value: 10.0,
        };
        let lt = Predicate::LessThan {
            field: "price".into(),
            value: 10.0,
        };
        assert!(matches(Some(&gt), &r));
        assert!(!matches(Some(&lt), &r));
    }

    #[test]
    fn non_numeric_field_fails_numeric_comparison() {
        let r = row(&[("price", Value::from("n/a"))]);
        let gt = Predicate::GreaterThan {
            field: "price".into(),
            value: 0.0,
        };
        assert!(!matches(Some(&gt), &r));
    }
}
