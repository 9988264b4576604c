//! The backend contract shared by every pipeline stage

use crate::core::column::Column;
use crate::core::error::Result;
use crate::core::query::DatatableResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where search, sort and pagination are carried out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Materialized records filtered, sorted and sliced in memory
    Client,
    /// A deferred query executed by the backing store
    Server,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Client => f.write_str("client"),
            Mode::Server => f.write_str("server"),
        }
    }
}

/// A backend the pipeline stages operate on
///
/// A context wraps exactly one backend kind for its whole lifetime; `search`
/// and `sort` only accumulate state, `paginate` is terminal and always runs.
///
/// Implementations must keep the operations permissive: an empty term, an
/// empty column set or an unknown direction leaves the context untouched.
pub trait Context {
    /// Keep records where at least one of `columns` contains `term`,
    /// ignoring case
    fn search(&mut self, term: &str, columns: &[&Column]);

    /// Order by `column`; `direction` other than asc/desc (any case) is a no-op
    fn sort(&mut self, column: &str, direction: &str);

    /// Produce the page `page` of size `per_page`
    ///
    /// `per_page` is expected to be positive; callers normalize it.
    fn paginate(&mut self, per_page: usize, page: usize) -> Result<DatatableResult>;

    /// Backend kind, fixed at construction
    fn mode(&self) -> Mode;
}
