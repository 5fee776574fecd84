//! Static descriptions of the listable warehouse tables.
//!
//! A [`TableSpec`] is the only path from request input to query text. The
//! projection columns double as the ORDER BY allowlist: a requested sort
//! column that is not registered here falls back to the spec's default key
//! and is never interpolated. Values (limit, offset) are always bound, so
//! the composed text contains no request-controlled data at all.

/// SQL source of a listable table or view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSource {
    /// A plain table or view, listed and counted directly.
    Table(&'static str),
    /// A grouped select over a base table. `count_expr` yields the number
    /// of groups, so pagination math and the fetched page always describe
    /// the same result set.
    Grouped {
        /// Select list with output aliases matching the spec's columns
        select: &'static str,
        /// FROM clause body
        from: &'static str,
        /// GROUP BY clause body
        group_by: &'static str,
        /// Aggregate expression counting the groups
        count_expr: &'static str,
    },
}

/// Static description of one listable table/view: its SQL source, its
/// projection columns in display order, and its default sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpec {
    name: &'static str,
    source: TableSource,
    columns: &'static [&'static str],
    default_order: &'static str,
}

impl TableSpec {
    /// Short name used for routing and log fields.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Projection columns in display order.
    pub fn columns(&self) -> &'static [&'static str] {
        self.columns
    }

    /// Sort key used when the request names no (or an unknown) column.
    pub fn default_order(&self) -> &'static str {
        self.default_order
    }

    /// Resolve a requested sort column against the allowlist.
    ///
    /// A column in the allowlist passes through unchanged; anything else
    /// (including no request at all) resolves to the default sort key.
    pub fn resolve_order_by(&self, requested: Option<&str>) -> &'static str {
        match requested {
            Some(col) => self
                .columns
                .iter()
                .find(|c| **c == col)
                .copied()
                .unwrap_or(self.default_order),
            None => self.default_order,
        }
    }

    /// Compose the page-listing statement.
    ///
    /// `order_by` must come from [`Self::resolve_order_by`]. The two
    /// placeholders bind offset and limit, in that order. Rows are
    /// projected through `row_to_json` so a listing is generic over its
    /// spec; the cast to text keeps the driver's column type expectations
    /// out of the picture.
    pub(crate) fn page_sql(&self, order_by: &str) -> String {
        match self.source {
            TableSource::Table(table) => format!(
                "SELECT row_to_json(t)::text AS row_to_json FROM \
                 (SELECT {} FROM {} ORDER BY {} OFFSET $1 LIMIT $2) t",
                self.columns.join(", "),
                table,
                order_by,
            ),
            TableSource::Grouped {
                select,
                from,
                group_by,
                ..
            } => format!(
                "SELECT row_to_json(t)::text AS row_to_json FROM \
                 (SELECT {} FROM {} GROUP BY {} ORDER BY {} OFFSET $1 LIMIT $2) t",
                select, from, group_by, order_by,
            ),
        }
    }

    /// Compose the row-count statement for the same source the page
    /// statement fetches from.
    pub(crate) fn count_sql(&self) -> String {
        match self.source {
            TableSource::Table(table) => format!("SELECT COUNT(*) AS total FROM {}", table),
            TableSource::Grouped {
                from, count_expr, ..
            } => format!("SELECT {} AS total FROM {}", count_expr, from),
        }
    }
}

/// The mutable emission record table.
pub const EMISSIONS: TableSpec = TableSpec {
    name: "emissions",
    source: TableSource::Table("co2emission_reduced"),
    columns: &[
        "imo",
        "ship_name",
        "technical_efficiency_number",
        "ship_type",
        "issue",
        "expiry",
    ],
    default_order: "imo",
};

/// Per-ship-type efficiency aggregates over the emission records.
pub const AGGREGATION: TableSpec = TableSpec {
    name: "aggregation",
    source: TableSource::Grouped {
        select: "COUNT(DISTINCT c.imo) AS ship_count, c.ship_type, \
                 MIN(c.technical_efficiency_number) AS min_efficiency, \
                 AVG(c.technical_efficiency_number) AS avg_efficiency, \
                 MAX(c.technical_efficiency_number) AS max_efficiency",
        from: "co2emission_reduced AS c",
        group_by: "c.ship_type",
        count_expr: "COUNT(DISTINCT c.ship_type)",
    },
    columns: &[
        "ship_count",
        "ship_type",
        "min_efficiency",
        "avg_efficiency",
        "max_efficiency",
    ],
    default_order: "ship_type",
};

/// The emission fact table of the warehouse star schema.
pub const EMISSION_FACT: TableSpec = TableSpec {
    name: "fact",
    source: TableSource::Table("emission_fact"),
    columns: &[
        "imo",
        "verifier_id",
        "issue_date_id",
        "expiry_date_id",
        "technical_efficiency_number",
        "total_co2_emissions",
    ],
    default_order: "imo",
};

/// Ship dimension.
pub const SHIP_DIM: TableSpec = TableSpec {
    name: "ship_dim",
    source: TableSource::Table("ship_dim"),
    columns: &["imo", "ship_name", "ship_type", "home_port"],
    default_order: "imo",
};

/// Verifier dimension.
pub const VERIFIER_DIM: TableSpec = TableSpec {
    name: "verifier_dim",
    source: TableSource::Table("verifier_dim"),
    columns: &[
        "verifier_id",
        "verifier_name",
        "verifier_nab",
        "verifier_country",
    ],
    default_order: "verifier_id",
};

/// Date dimension.
pub const DATE_DIM: TableSpec = TableSpec {
    name: "date_dim",
    source: TableSource::Table("date_dim"),
    columns: &["date_id", "full_date", "year", "month", "day"],
    default_order: "date_id",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_by_in_allowlist_passes_through() {
        assert_eq!(
            EMISSIONS.resolve_order_by(Some("ship_type")),
            "ship_type"
        );
    }

    #[test]
    fn order_by_outside_allowlist_falls_back_to_default() {
        assert_eq!(EMISSIONS.resolve_order_by(Some("imo; DROP TABLE")), "imo");
        assert_eq!(EMISSIONS.resolve_order_by(Some("")), "imo");
        assert_eq!(EMISSIONS.resolve_order_by(None), "imo");
    }

    #[test]
    fn each_spec_validates_against_its_own_columns() {
        // ship_count is an aggregation alias, not an emissions column
        assert_eq!(AGGREGATION.resolve_order_by(Some("ship_count")), "ship_count");
        assert_eq!(EMISSIONS.resolve_order_by(Some("ship_count")), "imo");
    }

    #[test]
    fn page_sql_binds_offset_and_limit() {
        let sql = EMISSIONS.page_sql("imo");
        assert!(sql.contains("OFFSET $1"));
        assert!(sql.contains("LIMIT $2"));
        assert!(sql.contains("FROM co2emission_reduced"));
        assert!(sql.contains("ORDER BY imo"));
    }

    #[test]
    fn grouped_page_sql_carries_group_by() {
        let sql = AGGREGATION.page_sql("ship_type");
        assert!(sql.contains("GROUP BY c.ship_type"));
        assert!(sql.contains("ORDER BY ship_type"));
        assert!(sql.contains("OFFSET $1"));
    }

    #[test]
    fn count_sql_addresses_the_listed_source() {
        assert_eq!(
            EMISSIONS.count_sql(),
            "SELECT COUNT(*) AS total FROM co2emission_reduced"
        );
        assert_eq!(
            AGGREGATION.count_sql(),
            "SELECT COUNT(DISTINCT c.ship_type) AS total FROM co2emission_reduced AS c"
        );
    }
}
