use crate::core::{Context, DatatableResult, Result};

/// How a stage chain finished
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Every stage forwarded; nothing produced a result
    Continue,
    /// A stage short-circuited with a result
    Done(DatatableResult),
}

/// A single step of a datatable pipeline
///
/// Each stage receives the shared context and a [`Next`] continuation. Calling
/// `next.run(context)` invokes the remaining stages; returning without calling
/// it short-circuits the chain.
///
/// # Example
/// ```
/// use datatable::core::{Context, Result};
/// use datatable::pipeline::{Flow, Next, Stage};
///
/// struct TraceStage;
///
/// impl Stage for TraceStage {
///     fn handle(&self, context: &mut dyn Context, next: Next<'_>) -> Result<Flow> {
///         println!("running in {} mode", context.mode());
///         next.run(context)
///     }
///
///     fn name(&self) -> &str {
///         "trace"
///     }
/// }
/// ```
pub trait Stage {
    /// Handle the stage, then forward to `next` or return a result
    fn handle(&self, context: &mut dyn Context, next: Next<'_>) -> Result<Flow>;

    /// Get stage name for logging
    fn name(&self) -> &str;
}

/// Continuation over the stages that have not run yet
///
/// An index-based cursor into the pipeline's stage list.
pub struct Next<'p> {
    stages: &'p [Box<dyn Stage + 'p>],
    index: usize,
}

impl<'p> Next<'p> {
    pub(crate) fn new(stages: &'p [Box<dyn Stage + 'p>]) -> Self {
        Self { stages, index: 0 }
    }

    /// Invoke the next stage, or finish with [`Flow::Continue`] when none is left
    pub fn run(self, context: &mut dyn Context) -> Result<Flow> {
        let Some(stage) = self.stages.get(self.index) else {
            return Ok(Flow::Continue);
        };

        tracing::debug!(
            stage = stage.name(),
            position = self.index + 1,
            of = self.stages.len(),
            "executing stage"
        );

        stage.handle(
            context,
            Next {
                stages: self.stages,
                index: self.index + 1,
            },
        )
    }

    /// Number of stages still to run, including the one `run` would invoke
    pub fn remaining(&self) -> usize {
        self.stages.len().saturating_sub(self.index)
    }
}
