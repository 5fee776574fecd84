//! Router wiring for every view.

use crate::handlers::{charts, emissions, listing};
use crate::state::AppState;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tracing::instrument;

/// Creates the application router.
///
/// Listing views register twice, with and without the page segment; the
/// detail view likewise with and without the key.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/emissions", get(listing::emissions))
        .route("/emissions/:page", get(listing::emissions))
        .route(
            "/emissions/imo",
            get(emissions::detail).post(emissions::submit),
        )
        .route(
            "/emissions/imo/:imo",
            get(emissions::detail).post(emissions::submit),
        )
        .route("/aggregation", get(listing::aggregation))
        .route("/aggregation/:page", get(listing::aggregation))
        .route("/fact", get(listing::fact))
        .route("/fact/:page", get(listing::fact))
        .route("/ship_dim", get(listing::ship_dim))
        .route("/ship_dim/:page", get(listing::ship_dim))
        .route("/verifier_dim", get(listing::verifier_dim))
        .route("/verifier_dim/:page", get(listing::verifier_dim))
        .route("/date_dim", get(listing::date_dim))
        .route("/date_dim/:page", get(listing::date_dim))
        .route("/visual", get(charts::visual))
        .route("/adv_q_visual", get(charts::adv_q_visual))
        .with_state(state)
}

/// Health check endpoint.
#[instrument(skip_all)]
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
