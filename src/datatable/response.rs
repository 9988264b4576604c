//! JSON envelope for datatable results

use crate::core::DatatableResult;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Wraps pipeline results for transport
///
/// The body is the result itself: `{"data": [...], "meta": {...}}`.
pub struct ResponseBuilder;

impl ResponseBuilder {
    /// Successful response carrying `result`
    pub fn success(result: DatatableResult) -> Json<DatatableResult> {
        Json(result)
    }
}

impl IntoResponse for DatatableResult {
    fn into_response(self) -> Response {
        (StatusCode::OK, ResponseBuilder::success(self)).into_response()
    }
}
