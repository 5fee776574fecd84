//! Database connection utilities.

use crate::StoreResult;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use seaboard_error::{StoreError, StoreErrorKind};
use tracing::instrument;

/// Connection pool over the warehouse database.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// One checked-out pool connection. Scoped: dropping it returns the
/// connection to the pool, including on error paths.
pub type PgPooledConnection = PooledConnection<ConnectionManager<PgConnection>>;

/// Establish a single connection to the PostgreSQL warehouse.
///
/// Reads the `DATABASE_URL` environment variable to determine the
/// connection string.
///
/// # Errors
///
/// Returns an error if:
/// - `DATABASE_URL` environment variable is not set
/// - Connection to the database fails
#[instrument(name = "database.establish_connection")]
pub fn establish_connection() -> StoreResult<PgConnection> {
    let database_url = database_url()?;

    tracing::debug!("Connecting to PostgreSQL warehouse");
    PgConnection::establish(&database_url).map_err(|e| {
        tracing::error!(error = %e, "Failed to establish database connection");
        StoreError::new(StoreErrorKind::Connection(e.to_string()))
    })
}

/// Create a connection pool for the PostgreSQL warehouse.
///
/// Reads the `DATABASE_URL` environment variable to determine the
/// connection string. `max_size` is owned by the server configuration so
/// deployments can size the pool to their worker count.
///
/// # Errors
///
/// Returns an error if:
/// - `DATABASE_URL` environment variable is not set
/// - Pool creation fails
#[instrument(name = "database.create_pool")]
pub fn create_pool(max_size: u32) -> StoreResult<PgPool> {
    let database_url = database_url()?;

    tracing::debug!(max_size, "Creating PostgreSQL connection pool");
    let manager = ConnectionManager::<PgConnection>::new(database_url);

    Pool::builder().max_size(max_size).build(manager).map_err(|e| {
        tracing::error!(error = %e, "Failed to create connection pool");
        StoreError::new(StoreErrorKind::Connection(e.to_string()))
    })
}

fn database_url() -> StoreResult<String> {
    std::env::var("DATABASE_URL").map_err(|_| {
        tracing::error!("DATABASE_URL environment variable not set");
        StoreError::new(StoreErrorKind::Connection(
            "DATABASE_URL environment variable not set".to_string(),
        ))
    })
}
