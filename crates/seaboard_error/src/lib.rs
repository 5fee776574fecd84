//! Error types for the Seaboard emissions reporting service.
//!
//! One module per domain. Every error struct records the file and line it
//! was raised from via [`std::panic::Location`], so a surfaced message
//! points back at the failing call site without a backtrace.

mod server;
mod store;
mod validation;

pub use server::{ServerError, ServerErrorKind};
pub use store::{StoreError, StoreErrorKind};
pub use validation::ValidationError;
