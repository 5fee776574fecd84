//! The generic paginated listing view.
//!
//! Every warehouse table shares one flow (count, paginate, fetch, shape)
//! parametrized by its [`TableSpec`]. The per-table handlers below only
//! pick the spec; none of them carries its own query logic.

use crate::response::ApiError;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, Query, State};
use seaboard_database::{self as db, TableSpec};
use seaboard_error::StoreError;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::instrument;

/// Query-string parameters accepted by every listing view.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingParams {
    /// Requested sort column; defaulted when not in the spec's allowlist
    pub order_by: Option<String>,
    /// One-time delete confirmation, carries the deleted IMO
    pub deleted: Option<String>,
}

/// Display-ready context for one listing page, consumed by the external
/// presenter. `columns` carries the display order for the row objects.
#[derive(Debug, Clone, Serialize)]
pub struct ListingContext {
    pub nbar: &'static str,
    pub columns: &'static [&'static str],
    pub rows: Vec<JsonValue>,
    pub page: i64,
    pub num_pages: i64,
    pub order_by: &'static str,
    pub msg: Option<String>,
}

fn render_listing(
    state: &AppState,
    spec: &'static TableSpec,
    requested_page: i64,
    params: ListingParams,
) -> Result<ListingContext, StoreError> {
    let mut conn = state.conn()?;

    let total = db::count(&mut conn, spec)?;
    let window = db::paginate(total, requested_page, state.page_size);
    let order_by = spec.resolve_order_by(params.order_by.as_deref());
    let rows = db::list_page(&mut conn, spec, order_by, state.page_size, window.offset)?;

    let msg = params.deleted.map(|imo| format!("✔ IMO {imo} deleted"));

    Ok(ListingContext {
        nbar: spec.name(),
        columns: spec.columns(),
        rows,
        page: window.page,
        num_pages: window.num_pages,
        order_by,
        msg,
    })
}

/// Paginated emission record listing.
#[instrument(skip(state, params))]
pub async fn emissions(
    State(state): State<AppState>,
    page: Option<Path<i64>>,
    Query(params): Query<ListingParams>,
) -> Result<Json<ListingContext>, ApiError> {
    let page = page.map(|Path(p)| p).unwrap_or(1);
    Ok(Json(render_listing(&state, &db::EMISSIONS, page, params)?))
}

/// Paginated per-ship-type aggregate listing.
#[instrument(skip(state, params))]
pub async fn aggregation(
    State(state): State<AppState>,
    page: Option<Path<i64>>,
    Query(params): Query<ListingParams>,
) -> Result<Json<ListingContext>, ApiError> {
    let page = page.map(|Path(p)| p).unwrap_or(1);
    Ok(Json(render_listing(&state, &db::AGGREGATION, page, params)?))
}

/// Paginated emission fact table listing.
#[instrument(skip(state, params))]
pub async fn fact(
    State(state): State<AppState>,
    page: Option<Path<i64>>,
    Query(params): Query<ListingParams>,
) -> Result<Json<ListingContext>, ApiError> {
    let page = page.map(|Path(p)| p).unwrap_or(1);
    Ok(Json(render_listing(&state, &db::EMISSION_FACT, page, params)?))
}

/// Paginated ship dimension listing.
#[instrument(skip(state, params))]
pub async fn ship_dim(
    State(state): State<AppState>,
    page: Option<Path<i64>>,
    Query(params): Query<ListingParams>,
) -> Result<Json<ListingContext>, ApiError> {
    let page = page.map(|Path(p)| p).unwrap_or(1);
    Ok(Json(render_listing(&state, &db::SHIP_DIM, page, params)?))
}

/// Paginated verifier dimension listing.
#[instrument(skip(state, params))]
pub async fn verifier_dim(
    State(state): State<AppState>,
    page: Option<Path<i64>>,
    Query(params): Query<ListingParams>,
) -> Result<Json<ListingContext>, ApiError> {
    let page = page.map(|Path(p)| p).unwrap_or(1);
    Ok(Json(render_listing(&state, &db::VERIFIER_DIM, page, params)?))
}

/// Paginated date dimension listing.
#[instrument(skip(state, params))]
pub async fn date_dim(
    State(state): State<AppState>,
    page: Option<Path<i64>>,
    Query(params): Query<ListingParams>,
) -> Result<Json<ListingContext>, ApiError> {
    let page = page.map(|Path(p)| p).unwrap_or(1);
    Ok(Json(render_listing(&state, &db::DATE_DIM, page, params)?))
}
