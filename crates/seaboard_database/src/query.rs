//! Generic listing queries over a [`TableSpec`].

use crate::{StoreResult, TableSpec};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Text};
use serde_json::Value as JsonValue;
use tracing::instrument;

/// Count the rows of a spec's source.
///
/// For a grouped view this is the number of groups, so the count always
/// matches what [`list_page`] pages over.
#[instrument(skip(conn), fields(table = spec.name()))]
pub fn count(conn: &mut PgConnection, spec: &TableSpec) -> StoreResult<i64> {
    let sql = spec.count_sql();
    tracing::debug!(sql = %sql, "Counting rows");

    let row: TotalRow = diesel::sql_query(&sql).get_result(conn)?;
    Ok(row.total)
}

/// Fetch one page of a spec's source as JSON rows.
///
/// `order_by` is resolved against the spec's allowlist before it reaches
/// the statement text; offset and limit travel as bound parameters. Each
/// returned value is one row keyed by column name, in ascending `order_by`
/// order. The caller pairs the rows with [`TableSpec::columns`] for
/// display ordering.
#[instrument(skip(conn), fields(table = spec.name()))]
pub fn list_page(
    conn: &mut PgConnection,
    spec: &TableSpec,
    order_by: &str,
    limit: i64,
    offset: i64,
) -> StoreResult<Vec<JsonValue>> {
    let order_by = spec.resolve_order_by(Some(order_by));
    let sql = spec.page_sql(order_by);
    tracing::debug!(sql = %sql, offset, limit, "Listing page");

    let rows: Vec<JsonRow> = diesel::sql_query(&sql)
        .bind::<BigInt, _>(offset)
        .bind::<BigInt, _>(limit)
        .load(conn)?;

    tracing::debug!(row_count = rows.len(), "Page fetched");

    rows.iter()
        .map(|row| serde_json::from_str(&row.row_to_json).map_err(Into::into))
        .collect()
}

/// Helper struct for deserializing `row_to_json` results.
#[derive(QueryableByName)]
struct JsonRow {
    #[diesel(sql_type = Text)]
    row_to_json: String,
}

/// Helper struct for deserializing count results.
#[derive(QueryableByName)]
struct TotalRow {
    #[diesel(sql_type = BigInt)]
    total: i64,
}
