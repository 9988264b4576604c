//! Request parameters and paginated results

use crate::core::error::{DatatableError, Result};
use crate::core::record::Record;
use axum::extract::Query;
use axum::http::Uri;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Page size used when a request omits `per_page` or sends a non-positive one
pub const DEFAULT_PER_PAGE: usize = 10;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse `asc`/`desc`, ignoring case
    pub fn parse(direction: &str) -> Option<Self> {
        if direction.eq_ignore_ascii_case("asc") {
            Some(Self::Asc)
        } else if direction.eq_ignore_ascii_case("desc") {
            Some(Self::Desc)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Search, sort and pagination parameters of one datatable request
///
/// Deserializes straight from a URL query string, so it can be used with
/// `axum::extract::Query`. All parameters are optional; normalization happens
/// in the accessors rather than at parse time.
///
/// # Example
/// ```rust,ignore
/// // GET /users?search=jane&sort=name&direction=desc&per_page=25&page=2
/// pub async fn list_users(Query(params): Query<RequestParams>) -> impl IntoResponse {
///     Datatable::make(users()).columns(columns()).request(params).process()
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RequestParams {
    /// Free-text search term
    pub search: Option<String>,

    /// Name of the column to sort by
    pub sort: Option<String>,

    /// `asc` or `desc`; anything else falls back to ascending
    pub direction: Option<String>,

    /// Items per page (non-positive values are coerced to the default)
    pub per_page: Option<i64>,

    /// Page number, starting at 1
    pub page: Option<i64>,
}

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse parameters from a raw query string (`search=jane&page=2`)
    pub fn from_query_str(query: &str) -> Result<Self> {
        let uri: Uri = format!("/?{}", query.trim_start_matches('?'))
            .parse()
            .map_err(|e| DatatableError::InvalidRequest {
                message: format!("invalid query string: {}", e),
            })?;

        let Query(params) =
            Query::<Self>::try_from_uri(&uri).map_err(|e| DatatableError::InvalidRequest {
                message: e.to_string(),
            })?;
        Ok(params)
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn with_sort(mut self, column: impl Into<String>, direction: impl Into<String>) -> Self {
        self.sort = Some(column.into());
        self.direction = Some(direction.into());
        self
    }

    pub fn with_per_page(mut self, per_page: i64) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub fn with_page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }

    /// Search term, or `None` when absent or empty
    ///
    /// Only the empty string counts as empty: `"0"` is searched for like any
    /// other term.
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|term| !term.is_empty())
    }

    /// Raw sort direction, defaulting to `asc`
    pub fn direction(&self) -> &str {
        self.direction.as_deref().unwrap_or("asc")
    }

    /// Page size, coerced to [`DEFAULT_PER_PAGE`] when missing or non-positive
    pub fn per_page(&self) -> usize {
        self.per_page_or(DEFAULT_PER_PAGE)
    }

    /// Page size, coerced to `default` when missing or non-positive
    pub fn per_page_or(&self, default: usize) -> usize {
        match self.per_page {
            Some(n) if n > 0 => usize::try_from(n).unwrap_or(default),
            _ => default,
        }
    }

    /// Page number, ensuring a minimum of 1
    pub fn page(&self) -> usize {
        self.page
            .and_then(|p| usize::try_from(p).ok())
            .unwrap_or(1)
            .max(1)
    }
}

/// Final output of a pipeline run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatatableResult {
    /// Records of the requested page
    pub data: Vec<Record>,

    /// Backend-dependent pagination metadata
    pub meta: Meta,
}

impl DatatableResult {
    /// Result of an in-memory run
    pub fn client(data: Vec<Record>, total: usize) -> Self {
        Self {
            data,
            meta: Meta::Client(ClientMeta::new(total)),
        }
    }

    /// Result of a deferred-query run
    pub fn server(data: Vec<Record>, pagination: PaginationMeta) -> Self {
        Self {
            data,
            meta: Meta::Server(pagination),
        }
    }

    /// Number of records matching the search, across all pages
    pub fn total(&self) -> usize {
        self.meta.total()
    }
}

/// Metadata attached to a [`DatatableResult`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Meta {
    Client(ClientMeta),
    Server(PaginationMeta),
}

impl Meta {
    pub fn total(&self) -> usize {
        match self {
            Meta::Client(meta) => meta.total,
            Meta::Server(meta) => meta.total,
        }
    }
}

/// `{ "mode": "client", "total": n }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientMeta {
    pub mode: &'static str,
    pub total: usize,
}

impl ClientMeta {
    pub fn new(total: usize) -> Self {
        Self {
            mode: "client",
            total,
        }
    }
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub current_page: usize,

    /// Number of items per page
    pub per_page: usize,

    /// Number of the last page (0 when there is nothing to show)
    pub last_page: usize,

    /// Total number of items (after search)
    pub total: usize,
}

impl PaginationMeta {
    /// Create pagination metadata from calculation
    pub fn new(current_page: usize, per_page: usize, total: usize) -> Self {
        // Ensure per_page is at least 1 to avoid division by zero
        let per_page = per_page.max(1);

        Self {
            current_page,
            per_page,
            last_page: total.div_ceil(per_page),
            total,
        }
    }
}
