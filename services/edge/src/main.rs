use anyhow::Result;
use common::{
    config::ServerConfig,
    database::{DatabaseConfig, init_pool},
    store::{PgStore, PromptStore},
    telemetry,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use edge::{routes, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_tracing("edge-service");

    info!("Starting edge service");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;
    let store = PgStore::new(pool);

    // Check database connectivity
    if store.health_check().await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    let app = routes::create_router(AppState::new(Arc::new(store)));

    let server_config = ServerConfig::from_env("EDGE", 3002)?;
    let addr = server_config.addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!("Edge service listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Edge service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
