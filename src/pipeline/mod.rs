//! Stage pipeline for datatable processing
//!
//! A [`Pipeline`] owns one [`Context`](crate::core::Context) and threads it
//! through an ordered list of [`Stage`]s. Each stage gets a [`Next`]
//! continuation and decides whether to forward or to stop the chain with a
//! result. The standard chain is search, sort, then paginate; pagination is
//! terminal.

pub mod core;
pub mod executor;
pub mod stages;

pub use self::core::{Flow, Next, Stage};
pub use executor::{Pipeline, PipelineOutput};
pub use stages::{PaginateStage, SearchStage, SortStage};
