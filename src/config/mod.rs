//! Configuration loading and management

use crate::core::{Column, ConfigError, DEFAULT_PER_PAGE, Mode};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

fn default_per_page() -> usize {
    DEFAULT_PER_PAGE
}

/// Configuration for one datatable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Table name, also used as the store table for query sources
    pub name: String,

    /// Forced processing mode; the source kind decides when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,

    /// Page size used when a request omits or zeroes `per_page`
    #[serde(default = "default_per_page")]
    pub default_per_page: usize,

    /// Upper bound for the requested page size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_per_page: Option<usize>,

    /// Column descriptors
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl TableConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mode: None,
            default_per_page: DEFAULT_PER_PAGE,
            max_per_page: None,
            columns: Vec::new(),
        }
    }

    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Column descriptors, in declaration order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Find a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.default_per_page == 0 {
            return Err(ConfigError::InvalidValue {
                field: format!("{}.default_per_page", self.name),
                message: "must be greater than 0".to_string(),
            });
        }

        if let Some(max) = self.max_per_page {
            if max < self.default_per_page {
                return Err(ConfigError::InvalidValue {
                    field: format!("{}.max_per_page", self.name),
                    message: format!(
                        "{} is lower than default_per_page ({})",
                        max, self.default_per_page
                    ),
                });
            }
        }

        Ok(())
    }
}

/// Complete configuration for a set of datatables
///
/// # Example
///
/// ```yaml
/// tables:
///   - name: users
///     default_per_page: 25
///     max_per_page: 100
///     columns:
///       - name: name
///         searchable: true
///         sortable: true
///       - name: email
///         searchable: true
///       - name: created_at
///         sortable: true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatatableConfig {
    /// List of table configurations
    #[serde(default)]
    pub tables: Vec<TableConfig>,
}

impl DatatableConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ConfigError::Io {
                message: format!("{}: {}", path.display(), e),
            },
        })?;

        let config = Self::from_yaml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            tables = config.tables.len(),
            "datatable configuration loaded"
        );
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check per-table limits and name uniqueness
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for table in &self.tables {
            if !seen.insert(table.name.as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: "tables".to_string(),
                    message: format!("duplicate table '{}'", table.name),
                });
            }
            table.validate()?;
        }
        Ok(())
    }

    /// Find a table configuration
    pub fn find_table(&self, name: &str) -> Option<&TableConfig> {
        self.tables.iter().find(|table| table.name == name)
    }

    /// Find a table configuration, failing when it is not declared
    pub fn table(&self, name: &str) -> Result<&TableConfig, ConfigError> {
        self.find_table(name)
            .ok_or_else(|| ConfigError::UnknownTable {
                table: name.to_string(),
            })
    }
}
