//! In-memory implementation of QueryStore for testing and development

use super::query::{Boolean, Operator, Predicate, Query, Where};
use super::{Page, QueryStore};
use crate::core::record::{self, Record};
use crate::core::SortDirection;
use anyhow::{Result, anyhow};
use regex::Regex;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// In-memory query store
///
/// Holds named tables of records and evaluates deferred queries against them
/// with the same semantics a SQL store would apply: `LIKE` is a
/// case-insensitive pattern match, `AND` binds tighter than `OR`, and null
/// fields never match a predicate. Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<HashMap<String, Vec<Record>>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style table creation
    pub fn with_table(self, name: impl Into<String>, records: Vec<Record>) -> Result<Self> {
        self.insert_many(name, records)?;
        Ok(self)
    }

    /// Create an empty table (no-op when it already exists)
    pub fn create_table(&self, name: impl Into<String>) -> Result<()> {
        let mut tables = self
            .tables
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        tables.entry(name.into()).or_default();
        Ok(())
    }

    /// Append one record, creating the table if needed
    pub fn insert(&self, table: impl Into<String>, record: Record) -> Result<()> {
        self.insert_many(table, vec![record])
    }

    /// Append records in order, creating the table if needed
    pub fn insert_many(&self, table: impl Into<String>, records: Vec<Record>) -> Result<()> {
        let mut tables = self
            .tables
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        tables.entry(table.into()).or_default().extend(records);
        Ok(())
    }

    /// Number of rows stored in `table`
    pub fn len(&self, table: &str) -> Result<usize> {
        let tables = self
            .tables
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        tables
            .get(table)
            .map(Vec::len)
            .ok_or_else(|| anyhow!("Table '{}' not found", table))
    }

    fn execute(&self, query: &Query) -> Result<Vec<Record>> {
        let filter = compile_wheres(query.wheres())?;

        let tables = self
            .tables
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let rows = tables
            .get(query.table_name())
            .ok_or_else(|| anyhow!("Table '{}' not found", query.table_name()))?;

        let mut matched: Vec<Record> = rows
            .iter()
            .filter(|row| evaluate(&filter, row))
            .cloned()
            .collect();

        if let Some(order) = query.order() {
            matched.sort_by(|a, b| {
                let ordering = record::compare_values(
                    record::resolve(a, &order.column),
                    record::resolve(b, &order.column),
                );
                match order.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }

        Ok(matched)
    }
}

impl QueryStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    fn fetch_page(&self, query: &Query, per_page: usize, page: usize) -> Result<Page> {
        let rows = self.execute(query)?;
        let total = rows.len();
        let offset = page.saturating_sub(1).saturating_mul(per_page);

        let items: Vec<Record> = rows.into_iter().skip(offset).take(per_page).collect();

        tracing::debug!(
            table = query.table_name(),
            total,
            returned = items.len(),
            "memory store executed paginated query"
        );

        Ok(Page { items, total })
    }

    fn fetch_all(&self, query: &Query) -> Result<Vec<Record>> {
        self.execute(query)
    }
}

// ---------------------------------------------------------------------------
// Predicate evaluation
// ---------------------------------------------------------------------------

enum Compiled {
    Eq { column: String, value: Value },
    Like { column: String, pattern: Regex },
    Nested(Vec<(Boolean, Compiled)>),
}

fn compile_wheres(wheres: &[Where]) -> Result<Vec<(Boolean, Compiled)>> {
    wheres
        .iter()
        .map(|w| Ok((w.boolean, compile_predicate(&w.predicate)?)))
        .collect()
}

fn compile_predicate(predicate: &Predicate) -> Result<Compiled> {
    match predicate {
        Predicate::Basic {
            column,
            operator: Operator::Eq,
            value,
        } => Ok(Compiled::Eq {
            column: column.clone(),
            value: value.clone(),
        }),
        Predicate::Basic {
            column,
            operator: Operator::Like,
            value,
        } => Ok(Compiled::Like {
            column: column.clone(),
            pattern: like_to_regex(&record::searchable_text(Some(value)))?,
        }),
        Predicate::Nested(inner) => Ok(Compiled::Nested(compile_wheres(inner)?)),
    }
}

/// Translate a `LIKE` pattern (`%`, `_`, `\` escape) into an anchored,
/// case-insensitive regex
fn like_to_regex(pattern: &str) -> Result<Regex> {
    let mut source = String::from("(?is)^");
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '%' => source.push_str(".*"),
            '_' => source.push('.'),
            '\\' => {
                let literal = chars.next().unwrap_or('\\');
                source.push_str(&regex::escape(literal.encode_utf8(&mut [0; 4])));
            }
            other => source.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
        }
    }
    source.push('$');

    Regex::new(&source).map_err(|e| anyhow!("Invalid LIKE pattern '{}': {}", pattern, e))
}

/// Evaluate a where list with `AND` binding tighter than `OR`
///
/// An empty list matches everything.
fn evaluate(clauses: &[(Boolean, Compiled)], row: &Record) -> bool {
    let mut any = false;
    let mut current = true;

    for (index, (boolean, clause)) in clauses.iter().enumerate() {
        let matched = matches(clause, row);
        if index > 0 && *boolean == Boolean::Or {
            any |= current;
            current = matched;
        } else {
            current &= matched;
        }
    }

    any || current
}

fn matches(clause: &Compiled, row: &Record) -> bool {
    match clause {
        Compiled::Eq { column, value } => match record::resolve(row, column) {
            None | Some(Value::Null) => false,
            Some(field) => {
                !value.is_null()
                    && record::compare_values(Some(field), Some(value)) == Ordering::Equal
            }
        },
        Compiled::Like { column, pattern } => match record::resolve(row, column) {
            None | Some(Value::Null) => false,
            field => pattern.is_match(&record::searchable_text(field)),
        },
        Compiled::Nested(inner) => evaluate(inner, row),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::into_records;
    use crate::storage::query::like_contains;
    use serde_json::json;

    fn store() -> MemoryStore {
        MemoryStore::new()
            .with_table(
                "users",
                into_records(json!([
                    {"id": 1, "name": "John", "email": "john@example.com", "active": true},
                    {"id": 2, "name": "Jane", "email": "jane@example.com", "active": false},
                    {"id": 3, "name": "Joan", "email": null, "active": true},
                ])),
            )
            .unwrap()
    }

    fn names(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r["name"].as_str().unwrap()).collect()
    }

    #[test]
    fn test_like_to_regex() {
        assert!(like_to_regex("%JAN%").unwrap().is_match("jane"));
        assert!(like_to_regex("j_n%").unwrap().is_match("Jane"));
        assert!(!like_to_regex("j_n").unwrap().is_match("Jane"));
        assert!(like_to_regex(&like_contains("50%")).unwrap().is_match("up to 50% off"));
        assert!(!like_to_regex(&like_contains("50%")).unwrap().is_match("up to 500 off"));
        assert!(like_to_regex("%a.b%").unwrap().is_match("a.b"));
        assert!(!like_to_regex("%a.b%").unwrap().is_match("axb"));
    }

    #[test]
    fn test_fetch_all_without_predicates() {
        let rows = store().fetch_all(&Query::table("users")).unwrap();
        assert_eq!(names(&rows), vec!["John", "Jane", "Joan"]);
    }

    #[test]
    fn test_where_eq_skips_null_and_mismatch() {
        let rows = store()
            .fetch_all(&Query::table("users").where_eq("active", true))
            .unwrap();
        assert_eq!(names(&rows), vec!["John", "Joan"]);
    }

    #[test]
    fn test_like_group_is_anded_with_base_constraint() {
        let mut query = Query::table("users").where_eq("active", true);
        query.where_any_like(&["name", "email"], like_contains("jo"));

        let rows = store().fetch_all(&query).unwrap();
        assert_eq!(names(&rows), vec!["John", "Joan"]);
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        // name = Jane OR name = John AND active = false  =>  only Jane
        let mut query = Query::table("users");
        query
            .push_where(
                Boolean::And,
                Predicate::Basic {
                    column: "name".into(),
                    operator: Operator::Eq,
                    value: json!("Jane"),
                },
            )
            .push_where(
                Boolean::Or,
                Predicate::Basic {
                    column: "name".into(),
                    operator: Operator::Eq,
                    value: json!("John"),
                },
            )
            .push_where(
                Boolean::And,
                Predicate::Basic {
                    column: "active".into(),
                    operator: Operator::Eq,
                    value: json!(false),
                },
            );

        let rows = store().fetch_all(&query).unwrap();
        assert_eq!(names(&rows), vec!["Jane"]);
    }

    #[test]
    fn test_order_and_page() {
        let mut query = Query::table("users");
        query.order_by("name", SortDirection::Desc);

        let page = store().fetch_page(&query, 2, 1).unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(names(&page.items), vec!["John", "Joan"]);

        let page = store().fetch_page(&query, 2, 2).unwrap();
        assert_eq!(names(&page.items), vec!["Jane"]);

        let page = store().fetch_page(&query, 2, 9).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 3);
    }

    #[test]
    fn test_unknown_table_is_an_error() {
        let err = store().fetch_all(&Query::table("ghosts")).unwrap_err();
        assert_eq!(err.to_string(), "Table 'ghosts' not found");
    }

    #[test]
    fn test_insert_and_len() {
        let store = MemoryStore::new();
        store.create_table("empty").unwrap();
        assert_eq!(store.len("empty").unwrap(), 0);

        store
            .insert("empty", json!({"name": "x"}).as_object().cloned().unwrap())
            .unwrap();
        assert_eq!(store.len("empty").unwrap(), 1);
        assert!(store.len("missing").is_err());
    }
}
