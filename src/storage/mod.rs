//! Record stores able to execute deferred queries

pub mod in_memory;
pub mod query;
#[cfg(feature = "sqlite")]
pub mod sqlite;

use crate::core::Record;
use anyhow::Result;

pub use in_memory::MemoryStore;
pub use query::{Boolean, Operator, OrderClause, Predicate, Query, Where, like_contains};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

/// One page of records fetched from a store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Records of the requested page, in query order
    pub items: Vec<Record>,
    /// Number of records matching the query, across all pages
    pub total: usize,
}

/// Trait for stores that can execute a [`Query`]
///
/// Implementations apply the query's predicates, then its order clause, then
/// slice the requested page. Each call is one round trip to the store.
pub trait QueryStore: Send + Sync {
    /// Short backend name used in errors and logs
    fn backend(&self) -> &'static str;

    /// Execute `query` and return page `page` (1-based) of size `per_page`
    fn fetch_page(&self, query: &Query, per_page: usize, page: usize) -> Result<Page>;

    /// Execute `query` and return every matching record
    fn fetch_all(&self, query: &Query) -> Result<Vec<Record>>;
}
