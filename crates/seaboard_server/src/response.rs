//! Error-to-response mapping for read handlers.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use seaboard_error::StoreError;
use serde_json::json;

/// Store failure surfaced from a read handler.
///
/// A missing record on direct lookup is a 404; anything else from the
/// store is a 500 with a generic body. Mutation handlers do not use this
/// type for validation/conflict outcomes, which re-render the form
/// context with HTTP 200 instead.
#[derive(Debug)]
pub struct ApiError(pub StoreError);

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            tracing::error!(error = %self.0, "Request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(json!({ "error": self.0.kind.to_string() }))).into_response()
    }
}
