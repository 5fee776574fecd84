//! Configuration for the reporting server.

use derive_getters::Getters;
use seaboard_error::{ServerError, ServerErrorKind};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
const DEFAULT_PAGE_SIZE: i64 = 20;
const DEFAULT_POOL_SIZE: u32 = 10;

/// Configuration for the reporting server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct ServerConfig {
    /// Address the HTTP listener binds to (e.g. "127.0.0.1:8000")
    bind_addr: String,
    /// Rows per listing page
    page_size: i64,
    /// Maximum connections in the database pool
    pool_size: u32,
}

impl ServerConfig {
    /// Create config from environment variables
    ///
    /// Reads:
    /// - `SEABOARD_BIND_ADDR` (default: "127.0.0.1:8000")
    /// - `SEABOARD_PAGE_SIZE` (default: 20, must be a positive integer)
    /// - `SEABOARD_POOL_SIZE` (default: 10)
    pub fn from_env() -> Result<Self, ServerError> {
        let bind_addr = std::env::var("SEABOARD_BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let page_size = match std::env::var("SEABOARD_PAGE_SIZE") {
            Ok(raw) => raw.parse::<i64>().ok().filter(|size| *size > 0).ok_or_else(|| {
                ServerError::new(ServerErrorKind::Configuration(format!(
                    "SEABOARD_PAGE_SIZE must be a positive integer, got '{raw}'"
                )))
            })?,
            Err(_) => DEFAULT_PAGE_SIZE,
        };
        let pool_size = match std::env::var("SEABOARD_POOL_SIZE") {
            Ok(raw) => raw.parse::<u32>().ok().filter(|size| *size > 0).ok_or_else(|| {
                ServerError::new(ServerErrorKind::Configuration(format!(
                    "SEABOARD_POOL_SIZE must be a positive integer, got '{raw}'"
                )))
            })?,
            Err(_) => DEFAULT_POOL_SIZE,
        };

        Ok(ServerConfigBuilder::default()
            .bind_addr(bind_addr)
            .page_size(page_size)
            .pool_size(pool_size)
            .build()
            .expect("Valid ServerConfig"))
    }

    /// Replace the bind address (used by the `--bind` flag).
    pub fn with_bind_addr(mut self, bind_addr: impl Into<String>) -> Self {
        self.bind_addr = bind_addr.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_produces_config() {
        let config = ServerConfigBuilder::default()
            .bind_addr("0.0.0.0:9000")
            .page_size(50_i64)
            .pool_size(4_u32)
            .build()
            .expect("Valid ServerConfig");
        assert_eq!(config.bind_addr(), "0.0.0.0:9000");
        assert_eq!(*config.page_size(), 50);
        assert_eq!(*config.pool_size(), 4);
    }

    #[test]
    fn with_bind_addr_replaces_only_the_address() {
        let config = ServerConfigBuilder::default()
            .bind_addr("127.0.0.1:8000")
            .page_size(20_i64)
            .pool_size(10_u32)
            .build()
            .expect("Valid ServerConfig")
            .with_bind_addr("0.0.0.0:80");
        assert_eq!(config.bind_addr(), "0.0.0.0:80");
        assert_eq!(*config.page_size(), 20);
    }
}
