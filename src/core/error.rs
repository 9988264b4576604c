//! Typed error handling for datatable runs
//!
//! The pipeline itself is permissive: unknown columns, invalid sort
//! directions, empty search terms and out-of-range pages are no-ops, never
//! errors. What remains is what the environment can throw at us:
//!
//! - [`DatatableError::Storage`]: the backing store failed while executing
//!   the deferred query (or while materializing rows for client mode)
//! - [`DatatableError::InvalidRequest`]: a raw query string could not be parsed
//! - [`DatatableError::Config`]: configuration loading or lookup failed
//!
//! # Example
//!
//! ```rust,ignore
//! match Datatable::make(source).columns(columns).request(params).process() {
//!     Ok(result) => println!("{} rows", result.total()),
//!     Err(DatatableError::Storage { backend, message }) => {
//!         eprintln!("{} is unavailable: {}", backend, message);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Result alias used across the crate
pub type Result<T, E = DatatableError> = std::result::Result<T, E>;

/// The main error type of the crate
#[derive(Debug, Error)]
pub enum DatatableError {
    /// The record store failed; the message carries the full cause chain
    #[error("Storage error ({backend}): {message}")]
    Storage { backend: String, message: String },

    /// Request parameters could not be parsed
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Internal errors (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors related to configuration parsing and lookup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to read configuration: {message}")]
    Io { message: String },

    #[error("Failed to parse configuration: {message}")]
    Parse { message: String },

    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    #[error("Unknown table '{table}'")]
    UnknownTable { table: String },
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl DatatableError {
    /// Wrap a store failure, keeping its whole context chain in the message
    pub fn storage(backend: impl Into<String>, err: anyhow::Error) -> Self {
        DatatableError::Storage {
            backend: backend.into(),
            message: format!("{:#}", err),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            DatatableError::Storage { .. } => StatusCode::SERVICE_UNAVAILABLE,
            DatatableError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            DatatableError::Config(ConfigError::UnknownTable { .. }) => StatusCode::NOT_FOUND,
            DatatableError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DatatableError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            DatatableError::Storage { .. } => "STORAGE_ERROR",
            DatatableError::InvalidRequest { .. } => "INVALID_REQUEST",
            DatatableError::Config(ConfigError::UnknownTable { .. }) => "UNKNOWN_TABLE",
            DatatableError::Config(_) => "CONFIG_ERROR",
            DatatableError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            DatatableError::Storage { backend, .. } => {
                Some(serde_json::json!({ "backend": backend }))
            }
            DatatableError::Config(ConfigError::UnknownTable { table }) => {
                Some(serde_json::json!({ "table": table }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for DatatableError {
    fn into_response(self) -> Response {
        tracing::error!(code = self.error_code(), error = %self, "datatable request failed");
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}
