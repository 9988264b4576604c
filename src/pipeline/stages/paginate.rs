use crate::core::{Context, Result};
use crate::pipeline::{Flow, Next, Stage};

/// Terminal stage: paginates the context and breaks the chain
///
/// Must be the last stage of a pipeline; anything after it never runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginateStage {
    per_page: usize,
    page: usize,
}

impl PaginateStage {
    pub fn new(per_page: usize, page: usize) -> Self {
        Self { per_page, page }
    }
}

impl Stage for PaginateStage {
    fn handle(&self, context: &mut dyn Context, next: Next<'_>) -> Result<Flow> {
        if next.remaining() > 0 {
            tracing::warn!(
                skipped = next.remaining(),
                "stages registered after pagination will not run"
            );
        }

        let result = context.paginate(self.per_page, self.page)?;
        Ok(Flow::Done(result))
    }

    fn name(&self) -> &str {
        "paginate"
    }
}
