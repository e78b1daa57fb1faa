//! HTTP mapping of the common error taxonomy

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use leadlens_common::Error;

/// Wrapper giving the common error type an HTTP representation.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            Error::Validation(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
            Error::AccessDenied(reason) => (StatusCode::FORBIDDEN, reason.clone()),
            Error::NotFound(what) => (StatusCode::NOT_FOUND, what.clone()),
            // Data-quality defect worth surfacing, not hiding.
            Error::PayloadMalformed(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Malformed evaluation payload: {detail}"),
            ),
            // Primary-source and other internal failures stay generic.
            Error::Database(e) => {
                error!(error = %e, "database error while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error".to_string(),
                )
            }
            other => {
                error!(error = %other, "internal error while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
