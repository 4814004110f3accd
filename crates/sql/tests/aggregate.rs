//! GROUP BY, aggregates and HAVING end to end.

mod common;

use common::{rows, sample_tables};
use explorer_sql::{QueryEngine, Tables, Value};

#[test]
fn sum_per_group() {
    let mut tables = Tables::new();
    tables.insert(
        "orders".to_owned(),
        rows(serde_json::json!([
            {"cust": 1, "total": 10},
            {"cust": 1, "total": 20},
            {"cust": 2, "total": 5}
        ])),
    );
    let engine = QueryEngine::new(&tables);
    let result = engine
        .execute("SELECT cust, SUM(total) as s FROM orders GROUP BY cust")
        .unwrap();
    assert_eq!(result.total_count, 2);
    assert_eq!(result.rows[0]["cust"], Value::Integer(1));
    assert_eq!(result.rows[0]["s"], Value::Integer(30));
    assert_eq!(result.rows[1]["cust"], Value::Integer(2));
    assert_eq!(result.rows[1]["s"], Value::Integer(5));
}

#[test]
fn count_star_without_group_by_yields_one_row() {
    let tables = sample_tables();
    let engine = QueryEngine::new(&tables);
    let result = engine
        .execute("SELECT COUNT(*) AS n FROM customers")
        .unwrap();
    assert_eq!(result.total_count, 1);
    assert_eq!(result.rows[0]["n"], Value::Integer(5));
}

#[test]
fn average_per_group() {
    let tables = sample_tables();
    let engine = QueryEngine::new(&tables);
    let result = engine
        .execute("SELECT city, AVG(age) AS avg_age FROM customers GROUP BY city")
        .unwrap();
    assert_eq!(result.total_count, 3);
    // Groups surface in first-seen order: Oslo, Bergen, London.
    assert_eq!(result.rows[0]["city"], Value::from("Oslo"));
    assert_eq!(result.rows[0]["avg_age"], Value::Integer(46));
    assert_eq!(result.rows[1]["city"], Value::from("Bergen"));
    assert_eq!(result.rows[1]["avg_age"], Value::Integer(41));
    assert_eq!(result.rows[2]["city"], Value::from("London"));
    assert_eq!(result.rows[2]["avg_age"], Value::Float(32.5));
}

#[test]
fn min_and_max() {
    let tables = sample_tables();
    let engine = QueryEngine::new(&tables);
    let result = engine
        .execute("SELECT MIN(price) AS cheapest, MAX(price) AS priciest FROM products")
        .unwrap();
    assert_eq!(result.rows[0]["cheapest"], Value::Integer(49));
    assert_eq!(result.rows[0]["priciest"], Value::Float(999.5));
}

#[test]
fn having_filters_aggregated_rows() {
    let tables = sample_tables();
    let engine = QueryEngine::new(&tables);
    let result = engine
        .execute("SELECT city, COUNT(*) AS n FROM customers GROUP BY city HAVING n > 1")
        .unwrap();
    assert_eq!(result.total_count, 2);
    let cities: Vec<_> = result.rows.iter().map(|r| r["city"].clone()).collect();
    assert_eq!(cities, vec![Value::from("Oslo"), Value::from("London")]);
}

#[test]
fn default_aggregate_output_names() {
    let tables = sample_tables();
    let engine = QueryEngine::new(&tables);
    let result = engine
        .execute("SELECT COUNT(*), SUM(total) FROM orders")
        .unwrap();
    let row = &result.rows[0];
    assert_eq!(row["count_all"], Value::Integer(5));
    assert_eq!(row["sum_total"], Value::Integer(790));
}

#[test]
fn where_runs_before_grouping() {
    let tables = sample_tables();
    let engine = QueryEngine::new(&tables);
    let result = engine
        .execute(
            "SELECT customer_id, COUNT(*) AS n FROM orders \
             WHERE status = 'shipped' GROUP BY customer_id",
        )
        .unwrap();
    assert_eq!(result.total_count, 3);
    for row in &result.rows {
        assert_eq!(row["n"], Value::Integer(1));
    }
}

#[test]
fn count_field_ignores_nulls() {
    let mut tables = Tables::new();
    tables.insert(
        "readings".to_owned(),
        rows(serde_json::json!([
            {"sensor": "a", "value": 1},
            {"sensor": "a", "value": null},
            {"sensor": "a"}
        ])),
    );
    let engine = QueryEngine::new(&tables);
    let result = engine
        .execute("SELECT COUNT(*) AS total, COUNT(value) AS present FROM readings")
        .unwrap();
    assert_eq!(result.rows[0]["total"], Value::Integer(3));
    assert_eq!(result.rows[0]["present"], Value::Integer(1));
}

#[test]
fn aggregate_over_empty_table_still_yields_a_row() {
    let mut tables = Tables::new();
    tables.insert("empty".to_owned(), Vec::new());
    let engine = QueryEngine::new(&tables);
    let result = engine
        .execute("SELECT COUNT(*) AS n, SUM(x) AS s, AVG(x) AS a, MIN(x) AS lo FROM empty")
        .unwrap();
    assert_eq!(result.total_count, 1);
    let row = &result.rows[0];
    assert_eq!(row["n"], Value::Integer(0));
    assert_eq!(row["s"], Value::Integer(0));
    assert_eq!(row["a"], Value::Integer(0));
    assert_eq!(row["lo"], Value::Null);
}

#[test]
fn grouping_by_two_columns() {
    let mut tables = Tables::new();
    tables.insert(
        "visits".to_owned(),
        rows(serde_json::json!([
            {"country": "NO", "city": "Oslo", "hits": 3},
            {"country": "NO", "city": "Oslo", "hits": 2},
            {"country": "NO", "city": "Bergen", "hits": 1},
            {"country": "UK", "city": "Oslo", "hits": 7}
        ])),
    );
    let engine = QueryEngine::new(&tables);
    let result = engine
        .execute(
            "SELECT country, city, SUM(hits) AS hits FROM visits GROUP BY country, city",
        )
        .unwrap();
    assert_eq!(result.total_count, 3);
    assert_eq!(result.rows[0]["hits"], Value::Integer(5));
    assert_eq!(result.rows[1]["hits"], Value::Integer(1));
    assert_eq!(result.rows[2]["hits"], Value::Integer(7));
}
