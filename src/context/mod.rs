//! Context implementations for the two supported backends

pub mod in_memory;
pub mod query;

pub use in_memory::InMemoryContext;
pub use query::QueryContext;

use crate::core::{Column, Context, DatatableResult, Mode, Result};

/// The closed set of contexts a [`Datatable`](crate::datatable::Datatable)
/// can resolve to at runtime
#[derive(Debug, Clone)]
pub enum AnyContext {
    InMemory(InMemoryContext),
    Query(QueryContext),
}

impl From<InMemoryContext> for AnyContext {
    fn from(context: InMemoryContext) -> Self {
        AnyContext::InMemory(context)
    }
}

impl From<QueryContext> for AnyContext {
    fn from(context: QueryContext) -> Self {
        AnyContext::Query(context)
    }
}

impl Context for AnyContext {
    fn search(&mut self, term: &str, columns: &[&Column]) {
        match self {
            AnyContext::InMemory(ctx) => ctx.search(term, columns),
            AnyContext::Query(ctx) => ctx.search(term, columns),
        }
    }

    fn sort(&mut self, column: &str, direction: &str) {
        match self {
            AnyContext::InMemory(ctx) => ctx.sort(column, direction),
            AnyContext::Query(ctx) => ctx.sort(column, direction),
        }
    }

    fn paginate(&mut self, per_page: usize, page: usize) -> Result<DatatableResult> {
        match self {
            AnyContext::InMemory(ctx) => ctx.paginate(per_page, page),
            AnyContext::Query(ctx) => ctx.paginate(per_page, page),
        }
    }

    fn mode(&self) -> Mode {
        match self {
            AnyContext::InMemory(ctx) => ctx.mode(),
            AnyContext::Query(ctx) => ctx.mode(),
        }
    }
}
