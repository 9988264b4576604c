use super::core::{Flow, Next, Stage};
use crate::core::{Context, DatatableResult, Result};
use std::time::Instant;

/// Outcome of a pipeline run
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutput<C> {
    /// A stage short-circuited with a result (normally pagination)
    Result(DatatableResult),
    /// Every stage forwarded; the transformed context is handed back
    Context(C),
}

impl<C> PipelineOutput<C> {
    /// The result, if a stage produced one
    pub fn into_result(self) -> Option<DatatableResult> {
        match self {
            PipelineOutput::Result(result) => Some(result),
            PipelineOutput::Context(_) => None,
        }
    }

    /// The context, if no stage produced a result
    pub fn into_context(self) -> Option<C> {
        match self {
            PipelineOutput::Result(_) => None,
            PipelineOutput::Context(context) => Some(context),
        }
    }
}

/// Ordered chain of stages run over a single context
///
/// # Example
/// ```
/// use datatable::context::InMemoryContext;
/// use datatable::core::Column;
/// use datatable::pipeline::{PaginateStage, Pipeline, SortStage};
///
/// let columns = vec![Column::make("name").sortable(true)];
/// let records = datatable::core::record::into_records(serde_json::json!([
///     {"name": "Beta"}, {"name": "Alpha"}
/// ]));
///
/// let output = Pipeline::new(InMemoryContext::new(records))
///     .add_stage(SortStage::new(Some("name".to_string()), "asc", &columns))
///     .add_stage(PaginateStage::new(10, 1))
///     .run()
///     .unwrap();
///
/// let result = output.into_result().unwrap();
/// assert_eq!(result.data[0]["name"], "Alpha");
/// ```
pub struct Pipeline<'a, C: Context> {
    context: C,
    stages: Vec<Box<dyn Stage + 'a>>,
}

impl<'a, C: Context> Pipeline<'a, C> {
    /// Create a pipeline over `context` with no stages
    pub fn new(context: C) -> Self {
        Self {
            context,
            stages: Vec::new(),
        }
    }

    /// Append a stage (builder style)
    pub fn add_stage<S: Stage + 'a>(mut self, stage: S) -> Self {
        self.push_stage(stage);
        self
    }

    /// Append a stage
    pub fn push_stage<S: Stage + 'a>(&mut self, stage: S) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Get the number of stages
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Run every stage in registration order
    ///
    /// Stops at the first stage that returns a result or an error. When all
    /// stages forward, the context itself is returned.
    pub fn run(mut self) -> Result<PipelineOutput<C>> {
        let mode = self.context.mode();
        tracing::debug!(%mode, stages = self.stages.len(), "starting pipeline");

        let start = Instant::now();
        let flow = Next::new(&self.stages).run(&mut self.context)?;
        let elapsed_us = start.elapsed().as_micros() as u64;

        match flow {
            Flow::Done(result) => {
                tracing::info!(
                    %mode,
                    total = result.total(),
                    returned = result.data.len(),
                    elapsed_us,
                    "pipeline completed"
                );
                Ok(PipelineOutput::Result(result))
            }
            Flow::Continue => {
                tracing::debug!(%mode, elapsed_us, "pipeline finished without a result");
                Ok(PipelineOutput::Context(self.context))
            }
        }
    }
}
