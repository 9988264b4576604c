//! Shared test harness for Context implementations
//!
//! Provides a small `people` dataset, column descriptors over it and factories
//! turning the dataset into each supported context.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod context_harness;
//! use context_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod context_contract_tests;

use datatable::context::{InMemoryContext, QueryContext};
use datatable::core::record::into_records;
use datatable::core::{Column, DatatableResult, Record};
use datatable::storage::{MemoryStore, Query};
use serde_json::{Value, json};
use std::sync::Arc;

/// Table name used by store-backed factories
pub const PEOPLE: &str = "people";

/// Five people, in insertion order
///
/// Bob has no city (null). Ages 27 appear twice.
pub fn people() -> Vec<Record> {
    into_records(json!([
        {"id": 1, "name": "Alice", "email": "alice@example.com", "age": 34, "city": "Paris"},
        {"id": 2, "name": "Bob", "email": "bob@example.org", "age": 27, "city": null},
        {"id": 3, "name": "Carol", "email": "carol@example.com", "age": 41, "city": "Berlin"},
        {"id": 4, "name": "Dave", "email": "dave@example.net", "age": 27, "city": "Paris"},
        {"id": 5, "name": "Eve", "email": "eve@example.org", "age": 22, "city": "Lisbon"},
    ]))
}

/// Ages mixing integers and floats around 2^53, where `f64` loses integer
/// precision
///
/// Exact ascending order by id: 4, 2, 1, 3.
pub fn large_ages() -> Vec<Record> {
    into_records(json!([
        {"id": 1, "name": "A", "email": "a@example.com", "age": 9_007_199_254_740_993_i64},
        {"id": 2, "name": "B", "email": "b@example.com", "age": 9_007_199_254_740_992.0_f64},
        {"id": 3, "name": "C", "email": "c@example.com", "age": 9_007_199_254_740_994.0_f64},
        {"id": 4, "name": "D", "email": "d@example.com", "age": 9_007_199_254_740_991_i64},
    ]))
}

pub fn name_column() -> Column {
    Column::make("name").searchable(true).sortable(true)
}

pub fn email_column() -> Column {
    Column::make("email").searchable(true)
}

pub fn city_column() -> Column {
    Column::make("city").searchable(true).sortable(true)
}

pub fn age_column() -> Column {
    Column::make("age").sortable(true)
}

pub fn columns() -> Vec<Column> {
    vec![
        Column::make("id").sortable(true),
        name_column(),
        email_column(),
        age_column(),
        city_column(),
    ]
}

pub fn in_memory_context(records: Vec<Record>) -> InMemoryContext {
    InMemoryContext::new(records)
}

pub fn memory_store(records: Vec<Record>) -> MemoryStore {
    MemoryStore::new()
        .with_table(PEOPLE, records)
        .expect("seed memory store")
}

pub fn memory_store_context(records: Vec<Record>) -> QueryContext {
    QueryContext::new(Arc::new(memory_store(records)), Query::table(PEOPLE))
}

/// Values of `field` across the returned page, in order
pub fn field(result: &DatatableResult, field: &str) -> Vec<Value> {
    result
        .data
        .iter()
        .map(|record| record.get(field).cloned().unwrap_or(Value::Null))
        .collect()
}

pub fn names(result: &DatatableResult) -> Vec<String> {
    result
        .data
        .iter()
        .filter_map(|record| record.get("name").and_then(Value::as_str))
        .map(str::to_string)
        .collect()
}

#[cfg(feature = "sqlite")]
pub fn sqlite_store(records: Vec<Record>) -> datatable::storage::SqliteStore {
    let store = datatable::storage::SqliteStore::open_in_memory().expect("open sqlite");
    store
        .execute_batch(
            "CREATE TABLE people (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                age INTEGER NOT NULL,
                city TEXT
            );",
        )
        .expect("create people table");
    for record in &records {
        store.insert(PEOPLE, record).expect("insert person");
    }
    store
}

#[cfg(feature = "sqlite")]
pub fn sqlite_context(records: Vec<Record>) -> QueryContext {
    QueryContext::new(Arc::new(sqlite_store(records)), Query::table(PEOPLE))
}
