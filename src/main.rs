use anyhow::Context;
use sea_orm::Database;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hamburgueria::api::{cors_layer, create_api_router};
use hamburgueria::config::Config;
use hamburgueria::entities::{seed_catalog, setup_schema};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    setup_schema(&db).await.context("Failed to create schema")?;

    if config.seed_catalog {
        seed_catalog(&db).await.context("Failed to seed catalog")?;
    }

    let shared_db = Arc::new(db);
    let app = create_api_router(shared_db).layer(cors_layer(&config.cors_origins));

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address()))?;
    info!(address = %listener.local_addr()?, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // Without a signal handler the server just runs until killed.
        std::future::pending::<()>().await;
    }
}
