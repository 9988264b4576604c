//! Context over materialized records

use crate::core::record::{self, Record};
use crate::core::{Column, Context, DatatableResult, Mode, Result, SortDirection};

/// Filters, sorts and slices an in-memory sequence of records
///
/// Every operation is evaluated eagerly: after `search` the context only holds
/// matching records, after `sort` they are reordered in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryContext {
    records: Vec<Record>,
}

impl InMemoryContext {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Records in their current (filtered, sorted) state
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<Record>> for InMemoryContext {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

impl Context for InMemoryContext {
    fn search(&mut self, term: &str, columns: &[&Column]) {
        let searchable: Vec<&str> = columns
            .iter()
            .filter(|column| column.is_searchable)
            .map(|column| column.name.as_str())
            .collect();

        if term.is_empty() || searchable.is_empty() {
            return;
        }

        let needle = term.to_lowercase();
        let before = self.records.len();

        self.records.retain(|row| {
            searchable.iter().any(|name| {
                record::searchable_text(record::resolve(row, name))
                    .to_lowercase()
                    .contains(&needle)
            })
        });

        tracing::debug!(
            term,
            before,
            after = self.records.len(),
            "in-memory search applied"
        );
    }

    fn sort(&mut self, column: &str, direction: &str) {
        let Some(direction) = SortDirection::parse(direction) else {
            return;
        };

        // Vec::sort_by is stable, equal keys keep their relative order
        self.records.sort_by(|a, b| {
            let ordering =
                record::compare_values(record::resolve(a, column), record::resolve(b, column));
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }

    fn paginate(&mut self, per_page: usize, page: usize) -> Result<DatatableResult> {
        let total = self.records.len();
        let offset = page.saturating_sub(1).saturating_mul(per_page);

        let data = self
            .records
            .iter()
            .skip(offset)
            .take(per_page)
            .cloned()
            .collect();

        Ok(DatatableResult::client(data, total))
    }

    fn mode(&self) -> Mode {
        Mode::Client
    }
}
