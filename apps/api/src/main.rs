//! # Savora API
//!
//! HTTP server for the recipe backend.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Savora API Server                                │
//! │                                                                         │
//! │  Client ───► HTTP (5000) ───► Handlers ───► RecipeRepository ───► DB  │
//! │                                  │                                      │
//! │                                  ▼                                      │
//! │                             ImageStore                                  │
//! │                           (object store)                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod routes;
mod state;
mod upload;

use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use savora_db::{Database, DbConfig};

use crate::config::ApiConfig;
use crate::state::AppState;
use crate::upload::ImageStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting Savora API server...");

    // Load configuration
    let config = ApiConfig::load()?;
    info!(
        port = config.port,
        db = %config.database_path,
        "Configuration loaded"
    );

    // Connect to the database (runs migrations)
    let db = Database::new(
        DbConfig::new(&config.database_path).max_connections(config.db_max_connections),
    )
    .await?;
    info!("Database ready");

    // Image upload is optional; without an object store the API still
    // serves everything except file parts
    let images = config.media_base_url.clone().map(|base| {
        info!(endpoint = %base, "Image store configured");
        ImageStore::new(
            base,
            config.media_public_url.clone(),
            config.media_api_key.clone(),
        )
    });
    if images.is_none() {
        info!("No image store configured; image uploads disabled");
    }

    let state = AppState {
        db: db.clone(),
        images,
        max_upload_bytes: config.max_upload_bytes,
    };

    let app = routes::router(state);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!(%addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
