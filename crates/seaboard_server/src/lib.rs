//! HTTP layer for the Seaboard emissions reporting service.
//!
//! Handlers shape requests into the store operations of
//! `seaboard_database` and shape rows and numeric series into JSON
//! context payloads. Rendering those contexts as HTML or charts is the
//! job of the external presentation layer; nothing here emits markup.

pub mod config;
pub mod form;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use routes::create_router;
pub use state::AppState;
