//! Fixed analytical queries over the emission records.
//!
//! The SQL here is part of the reporting contract and is not assembled
//! from request input; each query has a typed row struct. Reshaping into
//! chart series happens in the HTTP layer.

use crate::StoreResult;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Double, Nullable, Text};
use serde::Serialize;
use tracing::instrument;

/// Per-ship-type efficiency aggregate.
#[derive(Debug, Clone, QueryableByName, Serialize)]
pub struct ShipTypeAggregateRow {
    /// Number of distinct ships of this type
    #[diesel(sql_type = BigInt)]
    pub ship_count: i64,
    #[diesel(sql_type = Nullable<Text>)]
    pub ship_type: Option<String>,
    #[diesel(sql_type = Nullable<Double>)]
    pub min_efficiency: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub avg_efficiency: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub max_efficiency: Option<f64>,
}

/// Efficiency distribution quantiles for one ship type.
#[derive(Debug, Clone, QueryableByName, Serialize)]
pub struct EfficiencyPercentileRow {
    #[diesel(sql_type = Nullable<Text>)]
    pub ship_type: Option<String>,
    #[diesel(sql_type = Nullable<Double>)]
    pub p25: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub p50: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub p75: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub p90: Option<f64>,
}

/// One ship on a per-type efficiency leaderboard.
#[derive(Debug, Clone, QueryableByName, Serialize)]
pub struct EfficiencyRankRow {
    #[diesel(sql_type = BigInt)]
    pub imo: i64,
    #[diesel(sql_type = Nullable<Text>)]
    pub ship_name: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub ship_type: Option<String>,
    #[diesel(sql_type = Double)]
    pub technical_efficiency_number: f64,
    /// Rank within the ship type, 1 = most efficient
    #[diesel(sql_type = BigInt)]
    pub efficiency_rank: i64,
}

/// Distinct-ship count and MIN/AVG/MAX efficiency per ship type.
#[instrument(skip(conn))]
pub fn ship_type_aggregates(conn: &mut PgConnection) -> StoreResult<Vec<ShipTypeAggregateRow>> {
    let sql = "SELECT COUNT(DISTINCT c.imo) AS ship_count, c.ship_type, \
                      MIN(c.technical_efficiency_number) AS min_efficiency, \
                      AVG(c.technical_efficiency_number) AS avg_efficiency, \
                      MAX(c.technical_efficiency_number) AS max_efficiency \
               FROM co2emission_reduced AS c \
               GROUP BY c.ship_type \
               ORDER BY c.ship_type";
    tracing::debug!(sql = %sql, "Aggregating by ship type");

    let rows = diesel::sql_query(sql).load(conn)?;
    Ok(rows)
}

/// Efficiency quantiles (p25/p50/p75/p90) per ship type, over records
/// that carry an efficiency value.
#[instrument(skip(conn))]
pub fn efficiency_percentiles(
    conn: &mut PgConnection,
) -> StoreResult<Vec<EfficiencyPercentileRow>> {
    let sql = "SELECT c.ship_type, \
                      PERCENTILE_CONT(0.25) WITHIN GROUP \
                        (ORDER BY c.technical_efficiency_number) AS p25, \
                      PERCENTILE_CONT(0.50) WITHIN GROUP \
                        (ORDER BY c.technical_efficiency_number) AS p50, \
                      PERCENTILE_CONT(0.75) WITHIN GROUP \
                        (ORDER BY c.technical_efficiency_number) AS p75, \
                      PERCENTILE_CONT(0.90) WITHIN GROUP \
                        (ORDER BY c.technical_efficiency_number) AS p90 \
               FROM co2emission_reduced AS c \
               WHERE c.technical_efficiency_number IS NOT NULL \
               GROUP BY c.ship_type \
               ORDER BY c.ship_type";
    tracing::debug!(sql = %sql, "Computing efficiency percentiles");

    let rows = diesel::sql_query(sql).load(conn)?;
    Ok(rows)
}

/// The `per_type_limit` most efficient ships of each type, ranked by a
/// window function partitioned on ship type.
#[instrument(skip(conn))]
pub fn efficiency_leaders(
    conn: &mut PgConnection,
    per_type_limit: i64,
) -> StoreResult<Vec<EfficiencyRankRow>> {
    let sql = "SELECT imo, ship_name, ship_type, technical_efficiency_number, efficiency_rank \
               FROM (SELECT c.imo, c.ship_name, c.ship_type, c.technical_efficiency_number, \
                            RANK() OVER (PARTITION BY c.ship_type \
                                         ORDER BY c.technical_efficiency_number ASC) \
                              AS efficiency_rank \
                     FROM co2emission_reduced AS c \
                     WHERE c.technical_efficiency_number IS NOT NULL) ranked \
               WHERE efficiency_rank <= $1 \
               ORDER BY ship_type, efficiency_rank";
    tracing::debug!(sql = %sql, per_type_limit, "Ranking ships by efficiency");

    let rows = diesel::sql_query(sql)
        .bind::<BigInt, _>(per_type_limit)
        .load(conn)?;
    Ok(rows)
}
