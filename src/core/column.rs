//! Column descriptors

use serde::{Deserialize, Serialize};

/// Static metadata describing one column of a datatable
///
/// A column only gates what the pipeline may do with a field: search stages
/// consider columns flagged searchable, sort stages honour columns flagged
/// sortable. Everything else is silently ignored.
///
/// # Example
/// ```
/// use datatable::core::Column;
///
/// let name = Column::make("name").searchable(true).sortable(true);
/// assert!(name.is_searchable);
/// assert!(name.is_sortable);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Field name (dot-notation paths are resolved against nested records)
    pub name: String,

    #[serde(default, rename = "searchable")]
    pub is_searchable: bool,

    #[serde(default, rename = "sortable")]
    pub is_sortable: bool,
}

impl Column {
    /// Create a column that is neither searchable nor sortable
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_searchable: false,
            is_sortable: false,
        }
    }

    /// Alias of [`Column::new`] for builder-style chains
    pub fn make(name: impl Into<String>) -> Self {
        Self::new(name)
    }

    pub fn searchable(mut self, condition: bool) -> Self {
        self.is_searchable = condition;
        self
    }

    pub fn sortable(mut self, condition: bool) -> Self {
        self.is_sortable = condition;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
