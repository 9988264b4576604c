use crate::core::{Column, Context, Result, SortDirection};
use crate::pipeline::{Flow, Next, Stage};

/// Stage that orders the context by one sortable column
///
/// The direction is lowercased and falls back to `asc` when it is neither
/// `asc` nor `desc`. An unknown or non-sortable column is silently ignored.
/// Always forwards.
pub struct SortStage<'a> {
    column: Option<String>,
    direction: String,
    columns: &'a [Column],
}

impl<'a> SortStage<'a> {
    pub fn new(column: Option<String>, direction: &str, columns: &'a [Column]) -> Self {
        Self {
            column,
            direction: direction.to_lowercase(),
            columns,
        }
    }

    /// Normalized direction used when the stage runs
    pub fn direction(&self) -> SortDirection {
        SortDirection::parse(&self.direction).unwrap_or_default()
    }
}

impl Stage for SortStage<'_> {
    fn handle(&self, context: &mut dyn Context, next: Next<'_>) -> Result<Flow> {
        let Some(column) = self.column.as_deref().filter(|column| !column.is_empty()) else {
            return next.run(context);
        };

        match self.columns.iter().find(|def| def.name == column) {
            Some(def) if def.is_sortable => {
                context.sort(column, self.direction().as_str());
            }
            Some(_) => tracing::debug!(column, "column is not sortable, sort skipped"),
            None => tracing::debug!(column, "unknown sort column, sort skipped"),
        }

        next.run(context)
    }

    fn name(&self) -> &str {
        "sort"
    }
}
