use crate::core::{Column, Context, Result};
use crate::pipeline::{Flow, Next, Stage};

/// Stage that restricts the context to records matching a search term
///
/// Only columns flagged searchable take part. Without a term, or without any
/// searchable column, the stage does nothing. Always forwards.
///
/// # Example
/// ```
/// use datatable::context::InMemoryContext;
/// use datatable::core::Column;
/// use datatable::pipeline::{PaginateStage, Pipeline, SearchStage};
///
/// let columns = vec![Column::make("name").searchable(true)];
/// let records = datatable::core::record::into_records(serde_json::json!([
///     {"name": "John"}, {"name": "Jane"}
/// ]));
///
/// let result = Pipeline::new(InMemoryContext::new(records))
///     .add_stage(SearchStage::new(Some("jane".to_string()), &columns))
///     .add_stage(PaginateStage::new(10, 1))
///     .run()
///     .unwrap()
///     .into_result()
///     .unwrap();
///
/// assert_eq!(result.total(), 1);
/// ```
pub struct SearchStage<'a> {
    term: Option<String>,
    columns: &'a [Column],
}

impl<'a> SearchStage<'a> {
    pub fn new(term: Option<String>, columns: &'a [Column]) -> Self {
        Self { term, columns }
    }
}

impl Stage for SearchStage<'_> {
    fn handle(&self, context: &mut dyn Context, next: Next<'_>) -> Result<Flow> {
        if let Some(term) = self.term.as_deref().filter(|term| !term.is_empty()) {
            let searchable: Vec<&Column> = self
                .columns
                .iter()
                .filter(|column| column.is_searchable)
                .collect();

            if searchable.is_empty() {
                tracing::debug!(term, "no searchable column, search skipped");
            } else {
                context.search(term, &searchable);
            }
        }

        next.run(context)
    }

    fn name(&self) -> &str {
        "search"
    }
}
