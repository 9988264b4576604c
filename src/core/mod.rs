//! Core module containing the fundamental types and the backend contract

pub mod column;
pub mod context;
pub mod error;
pub mod query;
pub mod record;

pub use column::Column;
pub use context::{Context, Mode};
pub use error::{ConfigError, DatatableError, Result};
pub use query::{
    ClientMeta, DEFAULT_PER_PAGE, DatatableResult, Meta, PaginationMeta, RequestParams,
    SortDirection,
};
pub use record::Record;
