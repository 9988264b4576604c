//! Facade: picks a backend, builds the stage chain from request parameters
//! and runs it

pub mod response;

pub use response::ResponseBuilder;

use crate::config::TableConfig;
use crate::context::{AnyContext, InMemoryContext, QueryContext};
use crate::core::record::{self, Record};
use crate::core::{
    Column, DEFAULT_PER_PAGE, DatatableError, DatatableResult, Mode, RequestParams, Result,
};
use crate::pipeline::{PaginateStage, Pipeline, PipelineOutput, SearchStage, SortStage};
use crate::storage::{Query, QueryStore};
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use std::sync::Arc;

/// A store handle plus the base query to run against it
#[derive(Clone)]
pub struct QuerySource {
    store: Arc<dyn QueryStore>,
    query: Query,
}

impl QuerySource {
    pub fn new(store: Arc<dyn QueryStore>, query: Query) -> Self {
        Self { store, query }
    }

    pub fn query(&self) -> &Query {
        &self.query
    }
}

impl std::fmt::Debug for QuerySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuerySource")
            .field("backend", &self.store.backend())
            .field("query", &self.query)
            .finish()
    }
}

/// What a datatable runs over
#[derive(Debug, Clone)]
pub enum Source {
    /// Materialized records
    Collection(Vec<Record>),
    /// A deferred query
    Query(QuerySource),
}

impl Source {
    /// Mode used when none is requested explicitly
    pub fn default_mode(&self) -> Mode {
        match self {
            Source::Collection(_) => Mode::Client,
            Source::Query(_) => Mode::Server,
        }
    }
}

impl From<Vec<Record>> for Source {
    fn from(records: Vec<Record>) -> Self {
        Source::Collection(records)
    }
}

/// A JSON array of objects; non-object items are dropped
impl From<Value> for Source {
    fn from(value: Value) -> Self {
        Source::Collection(record::into_records(value))
    }
}

impl From<QuerySource> for Source {
    fn from(source: QuerySource) -> Self {
        Source::Query(source)
    }
}

/// Builder-style entry point
///
/// # Example
/// ```
/// use datatable::core::{Column, RequestParams};
/// use datatable::datatable::Datatable;
/// use serde_json::json;
///
/// let users = json!([
///     {"name": "John", "email": "john@example.com"},
///     {"name": "Jane", "email": "jane@example.com"},
/// ]);
///
/// let result = Datatable::make(users)
///     .columns([
///         Column::make("name").searchable(true).sortable(true),
///         Column::make("email").searchable(true),
///     ])
///     .request(RequestParams::new().with_search("jane"))
///     .process()
///     .unwrap();
///
/// assert_eq!(result.total(), 1);
/// assert_eq!(result.data[0]["name"], "Jane");
/// ```
#[derive(Debug, Clone)]
pub struct Datatable {
    source: Source,
    columns: Vec<Column>,
    params: RequestParams,
    mode: Mode,
    default_per_page: usize,
    max_per_page: Option<usize>,
}

impl Datatable {
    /// Start a datatable over `source`, in the source's default mode
    pub fn make(source: impl Into<Source>) -> Self {
        let source = source.into();
        Self {
            mode: source.default_mode(),
            source,
            columns: Vec::new(),
            params: RequestParams::default(),
            default_per_page: DEFAULT_PER_PAGE,
            max_per_page: None,
        }
    }

    /// Replace the column descriptors
    pub fn columns(mut self, columns: impl IntoIterator<Item = Column>) -> Self {
        self.columns = columns.into_iter().collect();
        self
    }

    /// Append one column descriptor
    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Request parameters to apply
    pub fn request(mut self, params: RequestParams) -> Self {
        self.params = params;
        self
    }

    pub fn server_side(self) -> Self {
        self.mode(Mode::Server)
    }

    pub fn client_side(self) -> Self {
        self.mode(Mode::Client)
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Page size used when the request has none (zero is ignored)
    pub fn default_per_page(mut self, per_page: usize) -> Self {
        if per_page > 0 {
            self.default_per_page = per_page;
        }
        self
    }

    /// Clamp requested page sizes to `max`
    pub fn max_per_page(mut self, max: usize) -> Self {
        self.max_per_page = Some(max.max(1));
        self
    }

    /// Apply columns, page sizes and forced mode from a table configuration
    pub fn with_table_config(mut self, table: &TableConfig) -> Self {
        self.columns = table.columns().to_vec();
        self = self.default_per_page(table.default_per_page);
        if let Some(max) = table.max_per_page {
            self = self.max_per_page(max);
        }
        if let Some(mode) = table.mode {
            self.mode = mode;
        }
        self
    }

    /// Mode the datatable was asked to run in
    pub fn requested_mode(&self) -> Mode {
        self.mode
    }

    /// Effective page size for the current request
    fn per_page(&self) -> usize {
        let per_page = self.params.per_page_or(self.default_per_page);
        if !matches!(self.params.per_page, Some(n) if n > 0) {
            tracing::debug!(
                requested = ?self.params.per_page,
                per_page,
                "per_page missing or non-positive, using default"
            );
        }

        match self.max_per_page {
            Some(max) if per_page > max => {
                tracing::debug!(requested = per_page, max, "per_page clamped");
                max
            }
            _ => per_page,
        }
    }

    /// Run search, sort and paginate and return the page
    pub fn process(self) -> Result<DatatableResult> {
        let per_page = self.per_page();
        let page = self.params.page();

        let Datatable {
            source,
            columns,
            params,
            mode,
            ..
        } = self;

        let context = resolve_context(source, mode)?;
        let output = Pipeline::new(context)
            .add_stage(SearchStage::new(
                params.search_term().map(str::to_string),
                &columns,
            ))
            .add_stage(SortStage::new(params.sort.clone(), params.direction(), &columns))
            .add_stage(PaginateStage::new(per_page, page))
            .run()?;

        match output {
            PipelineOutput::Result(result) => Ok(result),
            PipelineOutput::Context(_) => Err(DatatableError::Internal(
                "pipeline finished without paginating".to_string(),
            )),
        }
    }

    /// Process and render as an HTTP response
    pub fn respond(self) -> Response {
        match self.process() {
            Ok(result) => ResponseBuilder::success(result).into_response(),
            Err(err) => err.into_response(),
        }
    }
}

/// Pick the context matching the requested mode and the source kind
fn resolve_context(source: Source, mode: Mode) -> Result<AnyContext> {
    match (mode, source) {
        (Mode::Server, Source::Query(source)) => {
            Ok(QueryContext::new(source.store, source.query).into())
        }
        (Mode::Client, Source::Collection(records)) => Ok(InMemoryContext::new(records).into()),
        (Mode::Client, Source::Query(source)) => {
            let records = source
                .store
                .fetch_all(&source.query)
                .map_err(|e| DatatableError::storage(source.store.backend(), e))?;
            tracing::debug!(
                backend = source.store.backend(),
                table = source.query.table_name(),
                rows = records.len(),
                "query materialized for client-side processing"
            );
            Ok(InMemoryContext::new(records).into())
        }
        (Mode::Server, Source::Collection(records)) => {
            tracing::warn!(
                rows = records.len(),
                "server-side mode requested for a collection, processing in memory"
            );
            Ok(InMemoryContext::new(records).into())
        }
    }
}
