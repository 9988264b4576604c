//! Built-in pipeline stages, applied in this order: search, sort, paginate

pub mod paginate;
pub mod search;
pub mod sort;

pub use paginate::PaginateStage;
pub use search::SearchStage;
pub use sort::SortStage;
