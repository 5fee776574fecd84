//! PostgreSQL integration for the Seaboard emissions warehouse.
//!
//! Read access goes through a small generic layer: a [`TableSpec`] describes
//! each listable table or view (its SQL source, projection columns, and
//! default sort key), [`paginate`] turns a row count and a requested page
//! into a clamped page window, and [`list_page`]/[`count`] execute the
//! parameterized listing queries. Mutations on the emission record entity
//! go through [`insert`], [`update`], [`delete`], and [`get_by_key`]; the
//! fixed analytical queries live in [`analytics`].
//!
//! Column and table identifiers never come from request input: only names
//! registered in a `TableSpec` allowlist are interpolated into query text,
//! and every value travels as a bound parameter.

pub mod analytics;
mod connection;
mod emissions;
mod pager;
mod query;
mod table_spec;

pub use connection::{PgPool, PgPooledConnection, create_pool, establish_connection};
pub use emissions::{EmissionRecord, delete, get_by_key, insert, update};
pub use pager::{PageWindow, paginate};
pub use query::{count, list_page};
pub use table_spec::{
    AGGREGATION, DATE_DIM, EMISSION_FACT, EMISSIONS, SHIP_DIM, TableSource, TableSpec,
    VERIFIER_DIM,
};

/// Result type for store operations.
pub type StoreResult<T> = Result<T, seaboard_error::StoreError>;
