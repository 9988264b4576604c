//! Context over a deferred query

use crate::core::{
    Column, Context, DatatableError, DatatableResult, Mode, PaginationMeta, Result, SortDirection,
};
use crate::storage::{Query, QueryStore, like_contains};
use std::sync::Arc;

/// Accumulates search and sort as query clauses, executes once on paginate
///
/// `search` and `sort` never touch the store. `paginate` performs the single
/// round trip of the run and reports page-based pagination metadata.
#[derive(Clone)]
pub struct QueryContext {
    store: Arc<dyn QueryStore>,
    query: Query,
}

impl QueryContext {
    pub fn new(store: Arc<dyn QueryStore>, query: Query) -> Self {
        Self { store, query }
    }

    /// The query as accumulated so far
    pub fn query(&self) -> &Query {
        &self.query
    }
}

impl std::fmt::Debug for QueryContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryContext")
            .field("backend", &self.store.backend())
            .field("query", &self.query)
            .finish()
    }
}

impl Context for QueryContext {
    fn search(&mut self, term: &str, columns: &[&Column]) {
        if term.is_empty() || columns.is_empty() {
            return;
        }

        let names: Vec<&str> = columns
            .iter()
            .filter(|column| column.is_searchable)
            .map(|column| column.name.as_str())
            .collect();

        self.query.where_any_like(&names, like_contains(term));
    }

    fn sort(&mut self, column: &str, direction: &str) {
        if let Some(direction) = SortDirection::parse(direction) {
            self.query.order_by(column, direction);
        }
    }

    fn paginate(&mut self, per_page: usize, page: usize) -> Result<DatatableResult> {
        let fetched = self
            .store
            .fetch_page(&self.query, per_page, page)
            .map_err(|e| DatatableError::storage(self.store.backend(), e))?;

        tracing::debug!(
            backend = self.store.backend(),
            table = self.query.table_name(),
            total = fetched.total,
            page,
            per_page,
            "deferred query executed"
        );

        Ok(DatatableResult::server(
            fetched.items,
            PaginationMeta::new(page, per_page, fetched.total),
        ))
    }

    fn mode(&self) -> Mode {
        Mode::Server
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Meta;
    use crate::core::record::into_records;
    use crate::storage::{MemoryStore, OrderClause};
    use serde_json::json;

    fn context() -> QueryContext {
        let store = MemoryStore::new()
            .with_table(
                "users",
                into_records(json!([
                    {"name": "A", "email": "a@example.com"},
                    {"name": "B", "email": "b@example.com"},
                    {"name": "C", "email": "c@example.com"},
                ])),
            )
            .unwrap();
        QueryContext::new(Arc::new(store), Query::table("users"))
    }

    #[test]
    fn test_search_accumulates_without_executing() {
        let mut ctx = context();
        let name = Column::make("name").searchable(true);
        let email = Column::make("email");

        ctx.search("b", &[&name, &email]);
        assert_eq!(ctx.query().wheres().len(), 1);

        ctx.search("", &[&name]);
        ctx.search("b", &[]);
        assert_eq!(ctx.query().wheres().len(), 1);
    }

    #[test]
    fn test_search_with_only_unsearchable_columns_adds_nothing() {
        let mut ctx = context();
        let email = Column::make("email");
        ctx.search("b", &[&email]);
        assert!(ctx.query().wheres().is_empty());
    }

    #[test]
    fn test_sort_sets_single_order_clause() {
        let mut ctx = context();
        ctx.sort("name", "DESC");
        ctx.sort("email", "nope");

        assert_eq!(
            ctx.query().order(),
            Some(&OrderClause {
                column: "name".to_string(),
                direction: SortDirection::Desc,
            })
        );
    }

    #[test]
    fn test_paginate_reports_server_meta() {
        let mut ctx = context();
        let result = ctx.paginate(2, 1).unwrap();

        assert_eq!(result.data.len(), 2);
        assert_eq!(result.meta, Meta::Server(PaginationMeta::new(1, 2, 3)));
    }

    #[test]
    fn test_paginate_propagates_store_failure() {
        let mut ctx = QueryContext::new(Arc::new(MemoryStore::new()), Query::table("users"));
        let err = ctx.paginate(10, 1).unwrap_err();
        assert!(matches!(err, DatatableError::Storage { ref backend, .. } if backend == "memory"));
    }
}
