//! # datatable-rs
//!
//! Search, sort and pagination over tabular data, with one request/response
//! contract whether the rows live in memory or behind a query-capable store.
//!
//! ## Features
//!
//! - **Stage Pipeline**: search, sort and paginate run as independent stages
//!   chained through a continuation
//! - **Two Backends**: an in-memory context that filters, sorts and slices
//!   records, and a query context that accumulates clauses and executes once
//! - **Column Descriptors**: only searchable columns are searched, only
//!   sortable columns are sorted; anything else is a silent no-op
//! - **Configuration-Based**: declare tables and columns in YAML
//! - **Axum Integration**: request parameters deserialize from the query
//!   string, results and errors render as JSON responses
//! - **SQLite Store**: optional `sqlite` feature compiling queries to SQL
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use datatable::prelude::*;
//!
//! async fn list_users(
//!     State(store): State<Arc<dyn QueryStore>>,
//!     Query(params): Query<RequestParams>,
//! ) -> Response {
//!     Datatable::make(QuerySource::new(store, StoreQuery::table("users")))
//!         .columns([
//!             Column::make("name").searchable(true).sortable(true),
//!             Column::make("email").searchable(true),
//!             Column::make("created_at").sortable(true),
//!         ])
//!         .request(params)
//!         .respond()
//! }
//! ```

pub mod config;
pub mod context;
pub mod core;
pub mod datatable;
pub mod logging;
pub mod pipeline;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        Column, Context, DatatableError, DatatableResult, Meta, Mode, PaginationMeta, Record,
        RequestParams, Result, SortDirection,
    };

    // === Contexts ===
    pub use crate::context::{AnyContext, InMemoryContext, QueryContext};

    // === Pipeline ===
    pub use crate::pipeline::{
        Flow, Next, PaginateStage, Pipeline, PipelineOutput, SearchStage, SortStage, Stage,
    };

    // === Facade ===
    pub use crate::datatable::{Datatable, QuerySource, ResponseBuilder, Source};

    // === Storage ===
    pub use crate::storage::{MemoryStore, Query as StoreQuery, QueryStore};
    #[cfg(feature = "sqlite")]
    pub use crate::storage::SqliteStore;

    // === Config ===
    pub use crate::config::{DatatableConfig, TableConfig};

    // === External dependencies ===
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;

    // === Axum ===
    pub use axum::{
        Router,
        extract::{Query, State},
        response::Response,
        routing::get,
    };
}
