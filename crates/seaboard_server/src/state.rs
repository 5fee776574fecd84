//! Shared application state.

use seaboard_database::{PgPool, PgPooledConnection};
use seaboard_error::{StoreError, StoreErrorKind};

/// State shared by all request handlers: the connection pool and the
/// listing page size. Requests hold no other shared mutable state.
#[derive(Clone)]
pub struct AppState {
    /// Warehouse connection pool
    pub pool: PgPool,
    /// Rows per listing page
    pub page_size: i64,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(pool: PgPool, page_size: i64) -> Self {
        Self { pool, page_size }
    }

    /// Check a connection out of the pool for the duration of one
    /// request's queries.
    pub fn conn(&self) -> Result<PgPooledConnection, StoreError> {
        self.pool
            .get()
            .map_err(|e| StoreError::new(StoreErrorKind::Connection(e.to_string())))
    }
}
