//! Seaboard server - ship-emissions reporting over the warehouse.
//!
//! Binds the HTTP listener, builds the connection pool, and serves the
//! listing, detail, and chart views.

use clap::Parser;
use seaboard_server::{AppState, ServerConfig, create_router};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the reporting server.
#[derive(Parser, Debug)]
#[command(name = "seaboard-server")]
#[command(about = "Seaboard - ship emissions reporting service")]
struct Args {
    /// Bind address override (e.g. 0.0.0.0:8000)
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(bind) = args.bind {
        config = config.with_bind_addr(bind);
    }
    info!(
        bind_addr = %config.bind_addr(),
        page_size = *config.page_size(),
        pool_size = *config.pool_size(),
        "Starting Seaboard server"
    );

    let pool = seaboard_database::create_pool(*config.pool_size())?;
    let state = AppState::new(pool, *config.page_size());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr().as_str()).await?;
    info!(addr = %listener.local_addr()?, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}
