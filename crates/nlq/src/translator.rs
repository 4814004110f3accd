//! Free-text → query translation.
//!
//! Translation never fails: rules are tried in catalogue order, then a
//! cascade of coarser substring checks, and finally a hard-coded default.
//! The produced string is advisory — the caller re-validates it by actually
//! executing it — so a wrong guess costs nothing.

use tracing::debug;

use crate::keywords::{infer_table, DEFAULT_TABLE};
use crate::rules::rules;

/// Translates a free-text question into a query string.
///
/// `table_hint` names the table the caller has selected, if any; it wins
/// over keyword inference. The result always starts with SELECT.
pub fn translate(text: &str, table_hint: Option<&str>) -> String {
    let text = text.trim().to_lowercase();
    let table = table_hint
        .map(str::to_owned)
        .or_else(|| infer_table(&text).map(str::to_owned))
        .unwrap_or_else(|| DEFAULT_TABLE.to_owned());

    for rule in rules() {
        if let Some(caps) = rule.pattern.captures(&text) {
            debug!(rule = rule.name, "translation rule matched");
            return (rule.template)(&caps, &table);
        }
    }

    fallback(&text, &table, table_hint.is_some())
}

/// Coarse substring checks for questions no rule understood, ending in the
/// default query.
fn fallback(text: &str, table: &str, hinted: bool) -> String {
    debug!("no translation rule matched, using fallback");
    if text.contains("product") && text.contains("stock") {
        return "SELECT name, stock FROM products ORDER BY stock ASC".to_owned();
    }
    if text.contains("customer") && text.contains("city") {
        return "SELECT city, COUNT(*) AS count FROM customers GROUP BY city".to_owned();
    }
    if text.contains("order") && text.contains("revenue") {
        return "SELECT SUM(total) AS revenue FROM orders".to_owned();
    }
    if hinted || infer_table(text).is_some() {
        return format!("SELECT * FROM {} LIMIT 50", table);
    }
    format!("SELECT * FROM {} LIMIT 10", DEFAULT_TABLE)
}
