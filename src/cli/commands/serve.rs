use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::app::app;
use crate::config;
use crate::database::DatabaseManager;
use crate::state::AppState;
use crate::storage::CloudinaryImageStore;

pub async fn handle(port: Option<u16>, in_memory: bool) -> anyhow::Result<()> {
    let mut config = config::config().clone();
    if let Some(port) = port {
        config.server.port = port;
    }
    config.validate().context("invalid configuration")?;

    tracing::info!("Starting employee directory API in {:?} mode", config.environment);

    let port = config.server.port;
    let state = if in_memory {
        tracing::warn!("Using in-memory stores; data is discarded on exit");
        AppState::in_memory(config)
    } else {
        let db = DatabaseManager::connect(&config.database)
            .await
            .context("failed to connect to database")?;
        db.migrate().await.context("failed to apply migrations")?;

        let images = CloudinaryImageStore::from_config(&config.images)
            .context("image store is not configured")?;
        AppState::with_database(config, db, Arc::new(images))
    };

    let database = state.database.clone();
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(db) = database {
        db.close().await;
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
