use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;

use release_tracker::adapters::http::api_router;
use release_tracker::adapters::{InMemoryTrackerStore, PostgresTrackerStore};
use release_tracker::config::{AppConfig, DatabaseConfig};
use release_tracker::ports::TrackerStore;
use release_tracker::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    telemetry::init_tracing(&config.server);
    config.validate()?;

    let store = open_store(&config.database).await?;
    let app = api_router(store, config.validation)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )));

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Release tracker listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Release tracker stopped");
    Ok(())
}

async fn open_store(
    database: &DatabaseConfig,
) -> Result<Arc<dyn TrackerStore>, Box<dyn std::error::Error>> {
    if !database.is_configured() {
        tracing::warn!("No database URL configured, using the in-memory store");
        return Ok(Arc::new(InMemoryTrackerStore::new()));
    }

    let pool = PgPoolOptions::new()
        .min_connections(database.min_connections)
        .max_connections(database.max_connections)
        .acquire_timeout(Duration::from_secs(database.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(database.idle_timeout_secs))
        .connect(&database.url)
        .await?;

    if database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    Ok(Arc::new(PostgresTrackerStore::new(pool)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
