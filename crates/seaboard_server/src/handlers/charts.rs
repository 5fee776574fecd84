//! The chart views: fixed analytical queries reshaped into plain numeric
//! series for the external chart renderer.

use crate::response::ApiError;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use seaboard_database::analytics::{
    self, EfficiencyPercentileRow, EfficiencyRankRow, ShipTypeAggregateRow,
};
use serde::Serialize;
use tracing::instrument;

/// Ships shown per type on the efficiency leaderboard.
const LEADERS_PER_TYPE: i64 = 5;

/// One chart series: parallel label/value vectors plus a title. The
/// presenter decides how to draw it; nothing here is chart-library
/// specific.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Context for the ship-type aggregate charts.
#[derive(Debug, Clone, Serialize)]
pub struct VisualContext {
    pub nbar: &'static str,
    /// Average EEDI per ship type, drawn as a bar chart
    pub bar: ChartSeries,
    /// Maximum EEDI per ship type, drawn as a pie chart
    pub pie: ChartSeries,
}

/// Context for the percentile and leaderboard charts.
#[derive(Debug, Clone, Serialize)]
pub struct AdvancedVisualContext {
    pub nbar: &'static str,
    /// One series per efficiency quantile across ship types
    pub percentiles: Vec<ChartSeries>,
    /// Most efficient ships per type, ranked by window function
    pub leaders: Vec<EfficiencyRankRow>,
}

/// Ship-type aggregate charts.
#[instrument(skip(state))]
pub async fn visual(State(state): State<AppState>) -> Result<Json<VisualContext>, ApiError> {
    let mut conn = state.conn()?;
    let rows = analytics::ship_type_aggregates(&mut conn)?;
    let (bar, pie) = aggregate_series(&rows);

    Ok(Json(VisualContext {
        nbar: "visual",
        bar,
        pie,
    }))
}

/// Percentile and window-rank charts.
#[instrument(skip(state))]
pub async fn adv_q_visual(
    State(state): State<AppState>,
) -> Result<Json<AdvancedVisualContext>, ApiError> {
    let mut conn = state.conn()?;
    let percentile_rows = analytics::efficiency_percentiles(&mut conn)?;
    let leaders = analytics::efficiency_leaders(&mut conn, LEADERS_PER_TYPE)?;

    Ok(Json(AdvancedVisualContext {
        nbar: "adv_q_visual",
        percentiles: percentile_series(&percentile_rows),
        leaders,
    }))
}

fn type_label(ship_type: &Option<String>) -> String {
    ship_type.clone().unwrap_or_else(|| "unknown".to_string())
}

/// Shape the aggregate rows into the bar (average) and pie (maximum)
/// series. Groups without an efficiency value are skipped, so labels and
/// values stay parallel.
fn aggregate_series(rows: &[ShipTypeAggregateRow]) -> (ChartSeries, ChartSeries) {
    let mut bar = ChartSeries {
        title: "Average EEDI by ship type".to_string(),
        labels: Vec::new(),
        values: Vec::new(),
    };
    let mut pie = ChartSeries {
        title: "Maximum EEDI by ship type".to_string(),
        labels: Vec::new(),
        values: Vec::new(),
    };

    for row in rows {
        if let Some(avg) = row.avg_efficiency {
            bar.labels.push(type_label(&row.ship_type));
            bar.values.push(avg);
        }
        if let Some(max) = row.max_efficiency {
            pie.labels.push(type_label(&row.ship_type));
            pie.values.push(max);
        }
    }

    (bar, pie)
}

/// Shape the percentile rows into one series per quantile.
fn percentile_series(rows: &[EfficiencyPercentileRow]) -> Vec<ChartSeries> {
    let quantiles: [(&str, fn(&EfficiencyPercentileRow) -> Option<f64>); 4] = [
        ("p25", |row| row.p25),
        ("p50", |row| row.p50),
        ("p75", |row| row.p75),
        ("p90", |row| row.p90),
    ];

    quantiles
        .iter()
        .map(|(name, value_of)| {
            let mut series = ChartSeries {
                title: format!("EEDI {name} by ship type"),
                labels: Vec::new(),
                values: Vec::new(),
            };
            for row in rows {
                if let Some(value) = value_of(row) {
                    series.labels.push(type_label(&row.ship_type));
                    series.values.push(value);
                }
            }
            series
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aggregate_row(
        ship_type: Option<&str>,
        avg: Option<f64>,
        max: Option<f64>,
    ) -> ShipTypeAggregateRow {
        ShipTypeAggregateRow {
            ship_count: 3,
            ship_type: ship_type.map(String::from),
            min_efficiency: avg,
            avg_efficiency: avg,
            max_efficiency: max,
        }
    }

    #[test]
    fn aggregate_series_are_parallel() {
        let rows = vec![
            aggregate_row(Some("tanker"), Some(4.5), Some(9.0)),
            aggregate_row(Some("bulk carrier"), Some(3.2), Some(7.1)),
        ];
        let (bar, pie) = aggregate_series(&rows);
        assert_eq!(bar.labels, vec!["tanker", "bulk carrier"]);
        assert_eq!(bar.values, vec![4.5, 3.2]);
        assert_eq!(pie.labels.len(), pie.values.len());
        assert_eq!(pie.values, vec![9.0, 7.1]);
    }

    #[test]
    fn groups_without_values_are_skipped() {
        let rows = vec![
            aggregate_row(Some("tanker"), Some(4.5), None),
            aggregate_row(Some("ro-ro"), None, None),
        ];
        let (bar, pie) = aggregate_series(&rows);
        assert_eq!(bar.labels, vec!["tanker"]);
        assert!(pie.labels.is_empty());
        assert!(pie.values.is_empty());
    }

    #[test]
    fn missing_ship_type_gets_a_placeholder_label() {
        let rows = vec![aggregate_row(None, Some(2.0), Some(2.0))];
        let (bar, _) = aggregate_series(&rows);
        assert_eq!(bar.labels, vec!["unknown"]);
    }

    #[test]
    fn percentile_series_one_per_quantile() {
        let rows = vec![EfficiencyPercentileRow {
            ship_type: Some("tanker".to_string()),
            p25: Some(2.0),
            p50: Some(3.0),
            p75: Some(4.0),
            p90: Some(5.0),
        }];
        let series = percentile_series(&rows);
        assert_eq!(series.len(), 4);
        assert_eq!(series[0].values, vec![2.0]);
        assert_eq!(series[3].values, vec![5.0]);
        assert!(series.iter().all(|s| s.labels == vec!["tanker"]));
    }
}
