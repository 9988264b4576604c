//! SQLite storage backend using rusqlite.
//!
//! Provides `SqliteStore`, a [`QueryStore`] that compiles a deferred
//! [`Query`] into parameterized SQL and executes it with native
//! `LIMIT`/`OFFSET` pagination.
//!
//! # Feature flag
//!
//! This module is gated behind the `sqlite` feature flag:
//! ```toml
//! [dependencies]
//! datatable-rs = { version = "0.1", features = ["sqlite"] }
//! ```
//!
//! # Collation
//!
//! SQLite's `LIKE` is case-insensitive for ASCII letters only. The in-memory
//! backends fold case for all of Unicode, so searches on non-ASCII text may
//! match differently between the two.

use super::query::{Operator, Predicate, Query, Where};
use super::{Page, QueryStore};
use crate::core::Record;
use anyhow::{Context as _, Result, anyhow};
use regex::Regex;
use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::{Connection, params_from_iter};
use serde_json::{Number, Value};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

/// Query store backed by a SQLite connection
///
/// # Example
///
/// ```rust,ignore
/// use datatable::storage::{Query, SqliteStore};
///
/// let store = SqliteStore::open("app.db")?;
/// let page = store.fetch_page(&Query::table("users"), 25, 1)?;
/// ```
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Wrap an existing connection
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Open (or create) a database file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open SQLite database {}", path.display()))?;
        Ok(Self::new(conn))
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory SQLite")?;
        Ok(Self::new(conn))
    }

    /// Run raw SQL statements (schema setup, fixtures)
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute_batch(sql).context("Failed to execute SQL batch")?;
        Ok(())
    }

    /// Insert a record, mapping its keys to column names
    pub fn insert(&self, table: &str, record: &Record) -> Result<()> {
        if record.is_empty() {
            return Err(anyhow!("Cannot insert an empty record into '{}'", table));
        }

        let columns = record
            .keys()
            .map(|key| quote_identifier(key))
            .collect::<Result<Vec<_>>>()?;
        let placeholders = vec!["?"; columns.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quote_identifier(table)?,
            columns.join(", "),
            placeholders
        );
        let params: Vec<SqlValue> = record.values().map(to_sql_value).collect();

        let conn = self.lock()?;
        conn.execute(&sql, params_from_iter(params.iter()))
            .with_context(|| format!("Failed to insert into '{}'", table))?;
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| anyhow!("Failed to acquire connection lock: {}", e))
    }

    fn select(&self, query: &Query, limit: Option<(usize, usize)>) -> Result<Vec<Record>> {
        let mut params = Vec::new();
        let mut sql = format!("SELECT * FROM {}", quote_identifier(query.table_name())?);
        push_where_clause(&mut sql, &mut params, query.wheres())?;

        if let Some(order) = query.order() {
            sql.push_str(&format!(
                " ORDER BY {} {}",
                quote_identifier(&order.column)?,
                order.direction.as_str().to_uppercase()
            ));
        }

        if let Some((per_page, offset)) = limit {
            sql.push_str(" LIMIT ? OFFSET ?");
            params.push(SqlValue::Integer(to_i64(per_page)));
            params.push(SqlValue::Integer(to_i64(offset)));
        }

        tracing::debug!(sql = %sql, params = params.len(), "sqlite select");

        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(&sql)
            .with_context(|| format!("Failed to prepare query on '{}'", query.table_name()))?;
        let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let mut rows = stmt
            .query(params_from_iter(params.iter()))
            .context("Failed to execute query")?;

        let mut records = Vec::new();
        while let Some(row) = rows.next().context("Failed to read row")? {
            let mut record = Record::new();
            for (index, name) in names.iter().enumerate() {
                record.insert(name.clone(), from_sql_value(row.get_ref(index)?));
            }
            records.push(record);
        }
        Ok(records)
    }

    fn count(&self, query: &Query) -> Result<usize> {
        let mut params = Vec::new();
        let mut sql = format!(
            "SELECT COUNT(*) FROM {}",
            quote_identifier(query.table_name())?
        );
        push_where_clause(&mut sql, &mut params, query.wheres())?;

        let conn = self.lock()?;
        let total: i64 = conn
            .query_row(&sql, params_from_iter(params.iter()), |row| row.get(0))
            .with_context(|| format!("Failed to count rows of '{}'", query.table_name()))?;
        Ok(usize::try_from(total).unwrap_or(0))
    }
}

impl QueryStore for SqliteStore {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    fn fetch_page(&self, query: &Query, per_page: usize, page: usize) -> Result<Page> {
        let total = self.count(query)?;
        let offset = page.saturating_sub(1).saturating_mul(per_page);
        let items = self.select(query, Some((per_page, offset)))?;
        Ok(Page { items, total })
    }

    fn fetch_all(&self, query: &Query) -> Result<Vec<Record>> {
        self.select(query, None)
    }
}

// ---------------------------------------------------------------------------
// SQL compilation
// ---------------------------------------------------------------------------

/// Validate and double-quote an identifier (`name` or `table.column`)
///
/// Identifiers are interpolated into SQL, so anything outside
/// `[A-Za-z_][A-Za-z0-9_]*` segments is rejected.
fn quote_identifier(identifier: &str) -> Result<String> {
    static IDENTIFIER: OnceLock<Regex> = OnceLock::new();
    let regex = IDENTIFIER.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)?$")
            .expect("identifier regex is valid")
    });

    if !regex.is_match(identifier) {
        return Err(anyhow!("Invalid SQL identifier '{}'", identifier));
    }

    Ok(identifier
        .split('.')
        .map(|part| format!("\"{}\"", part))
        .collect::<Vec<_>>()
        .join("."))
}

fn push_where_clause(sql: &mut String, params: &mut Vec<SqlValue>, wheres: &[Where]) -> Result<()> {
    if wheres.is_empty() {
        return Ok(());
    }
    sql.push_str(" WHERE ");
    push_wheres(sql, params, wheres)
}

fn push_wheres(sql: &mut String, params: &mut Vec<SqlValue>, wheres: &[Where]) -> Result<()> {
    for (index, clause) in wheres.iter().enumerate() {
        if index > 0 {
            sql.push(' ');
            sql.push_str(clause.boolean.as_sql());
            sql.push(' ');
        }

        match &clause.predicate {
            Predicate::Basic {
                column,
                operator,
                value,
            } => {
                sql.push_str(&quote_identifier(column)?);
                sql.push(' ');
                sql.push_str(operator.as_sql());
                sql.push_str(" ?");
                if *operator == Operator::Like {
                    sql.push_str(" ESCAPE '\\'");
                }
                params.push(to_sql_value(value));
            }
            Predicate::Nested(inner) if inner.is_empty() => sql.push_str("1 = 1"),
            Predicate::Nested(inner) => {
                sql.push('(');
                push_wheres(sql, params, inner)?;
                sql.push(')');
            }
        }
    }
    Ok(())
}

fn to_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

fn to_sql_value(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => SqlValue::Real(n.as_f64().unwrap_or_default()),
        },
        Value::String(s) => SqlValue::Text(s.clone()),
        other => SqlValue::Text(other.to_string()),
    }
}

fn from_sql_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Value::Array(bytes.iter().map(|b| Value::from(*b)).collect()),
    }
}
