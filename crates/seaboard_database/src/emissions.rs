//! Mutations and point lookups for the emission record entity.
//!
//! One row of `co2emission_reduced`, keyed by the IMO number. The column
//! list is statically known; every value travels as a bound parameter.
//! Uniqueness of the key is enforced by the store, not here.

use crate::StoreResult;
use chrono::NaiveDate;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Date, Double, Nullable, Text};
use seaboard_error::{StoreError, StoreErrorKind};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One emission record. All non-key fields are nullable in the warehouse;
/// absent form input is stored as NULL rather than an empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionRecord {
    /// IMO number, the natural key. Immutable after creation.
    pub imo: i64,
    pub ship_name: Option<String>,
    pub technical_efficiency_number: Option<f64>,
    pub ship_type: Option<String>,
    pub issue: Option<NaiveDate>,
    pub expiry: Option<NaiveDate>,
}

/// Insert a new emission record.
///
/// # Errors
///
/// `Conflict` when a record with the same IMO already exists; any other
/// store failure as `Query`.
#[instrument(skip(conn, record), fields(imo = record.imo))]
pub fn insert(conn: &mut PgConnection, record: &EmissionRecord) -> StoreResult<()> {
    let sql = "INSERT INTO co2emission_reduced \
               (imo, ship_name, technical_efficiency_number, ship_type, issue, expiry) \
               VALUES ($1, $2, $3, $4, $5, $6)";
    tracing::debug!(sql = %sql, "Inserting emission record");

    diesel::sql_query(sql)
        .bind::<BigInt, _>(record.imo)
        .bind::<Nullable<Text>, _>(record.ship_name.clone())
        .bind::<Nullable<Double>, _>(record.technical_efficiency_number)
        .bind::<Nullable<Text>, _>(record.ship_type.clone())
        .bind::<Nullable<Date>, _>(record.issue)
        .bind::<Nullable<Date>, _>(record.expiry)
        .execute(conn)?;

    tracing::info!(imo = record.imo, "Emission record inserted");
    Ok(())
}

/// Update an existing emission record in place.
///
/// The key is immutable: `record.imo` only selects the row and never
/// appears in the SET clause.
///
/// # Errors
///
/// `NotFound` when no record with the given IMO exists.
#[instrument(skip(conn, record), fields(imo = record.imo))]
pub fn update(conn: &mut PgConnection, record: &EmissionRecord) -> StoreResult<()> {
    let sql = "UPDATE co2emission_reduced \
               SET ship_name = $1, technical_efficiency_number = $2, \
                   ship_type = $3, issue = $4, expiry = $5 \
               WHERE imo = $6";
    tracing::debug!(sql = %sql, "Updating emission record");

    let affected = diesel::sql_query(sql)
        .bind::<Nullable<Text>, _>(record.ship_name.clone())
        .bind::<Nullable<Double>, _>(record.technical_efficiency_number)
        .bind::<Nullable<Text>, _>(record.ship_type.clone())
        .bind::<Nullable<Date>, _>(record.issue)
        .bind::<Nullable<Date>, _>(record.expiry)
        .bind::<BigInt, _>(record.imo)
        .execute(conn)?;

    if affected == 0 {
        return Err(StoreError::new(StoreErrorKind::NotFound));
    }

    tracing::info!(imo = record.imo, "Emission record updated");
    Ok(())
}

/// Delete an emission record.
///
/// Idempotent: deleting an absent key affects zero rows and is reported
/// as success.
#[instrument(skip(conn))]
pub fn delete(conn: &mut PgConnection, imo: i64) -> StoreResult<()> {
    let sql = "DELETE FROM co2emission_reduced WHERE imo = $1";
    tracing::debug!(sql = %sql, "Deleting emission record");

    let affected = diesel::sql_query(sql)
        .bind::<BigInt, _>(imo)
        .execute(conn)?;

    tracing::info!(imo, affected, "Emission record delete completed");
    Ok(())
}

/// Fetch one emission record by IMO.
///
/// Absence is `None`, not an error; the caller decides whether that is a
/// 404.
#[instrument(skip(conn))]
pub fn get_by_key(conn: &mut PgConnection, imo: i64) -> StoreResult<Option<EmissionRecord>> {
    let sql = "SELECT imo, ship_name, technical_efficiency_number, ship_type, issue, expiry \
               FROM co2emission_reduced WHERE imo = $1";
    tracing::debug!(sql = %sql, "Fetching emission record");

    let row: Option<EmissionRow> = diesel::sql_query(sql)
        .bind::<BigInt, _>(imo)
        .get_result(conn)
        .optional()?;

    Ok(row.map(EmissionRow::into_record))
}

#[derive(QueryableByName)]
struct EmissionRow {
    #[diesel(sql_type = BigInt)]
    imo: i64,
    #[diesel(sql_type = Nullable<Text>)]
    ship_name: Option<String>,
    #[diesel(sql_type = Nullable<Double>)]
    technical_efficiency_number: Option<f64>,
    #[diesel(sql_type = Nullable<Text>)]
    ship_type: Option<String>,
    #[diesel(sql_type = Nullable<Date>)]
    issue: Option<NaiveDate>,
    #[diesel(sql_type = Nullable<Date>)]
    expiry: Option<NaiveDate>,
}

impl EmissionRow {
    fn into_record(self) -> EmissionRecord {
        EmissionRecord {
            imo: self.imo,
            ship_name: self.ship_name,
            technical_efficiency_number: self.technical_efficiency_number,
            ship_type: self.ship_type,
            issue: self.issue,
            expiry: self.expiry,
        }
    }
}
