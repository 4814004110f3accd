//! Shared fixtures for the query engine integration tests.

#![allow(dead_code)]

use explorer_sql::{Row, Tables};

/// Deserializes plain JSON rows into the engine's row type.
pub fn rows(value: serde_json::Value) -> Vec<Row> {
    serde_json::from_value(value).expect("fixture rows must deserialize")
}

/// The demo-scale table store the explorer ships with: a handful of
/// customers, their orders, and a product catalogue.
pub fn sample_tables() -> Tables {
    let mut tables = Tables::new();
    tables.insert(
        "customers".to_owned(),
        rows(serde_json::json!([
            {"id": 1, "name": "John Doe", "email": "john@example.com", "city": "Oslo", "age": 34},
            {"id": 2, "name": "Johnny Walker", "email": "johnny@example.com", "city": "Bergen", "age": 41},
            {"id": 3, "name": "Ada Lovelace", "email": "ada@example.com", "city": "London", "age": 36},
            {"id": 4, "name": "Grace Hopper", "email": "grace@example.com", "city": "Oslo", "age": 58},
            {"id": 5, "name": "Mara Chen", "email": "mara@example.com", "city": "London", "age": 29}
        ])),
    );
    tables.insert(
        "orders".to_owned(),
        rows(serde_json::json!([
            {"id": 101, "customer_id": 1, "total": 250, "status": "shipped"},
            {"id": 102, "customer_id": 1, "total": 120, "status": "pending"},
            {"id": 103, "customer_id": 2, "total": 80, "status": "shipped"},
            {"id": 104, "customer_id": 3, "total": 300, "status": "cancelled"},
            {"id": 105, "customer_id": 3, "total": 40, "status": "shipped"}
        ])),
    );
    tables.insert(
        "products".to_owned(),
        rows(serde_json::json!([
            {"id": 1, "name": "Laptop", "price": 999.5, "stock": 12},
            {"id": 2, "name": "Phone", "price": 599, "stock": 0},
            {"id": 3, "name": "Desk Lamp", "price": 49, "stock": 37},
            {"id": 4, "name": "Monitor", "price": 249, "stock": 8}
        ])),
    );
    tables
}
