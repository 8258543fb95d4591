//! HTTP API
//!
//! ## Routes
//!
//! - `GET /assets/{asset_id}/pools` → `[{"id": ...}]`
//! - `GET /assets/{asset_id}/volume?start=&end=` → `{"TotalVolumeUSD": ...}`
//! - `GET /blocks/{block_number}/swaps` → `["<swap id>", ...]`
//! - `GET /blocks/{block_number}/swapped-assets` → `["<address>", ...]`

pub mod error;
pub mod handlers;
pub mod validation;

pub use error::ApiError;
pub use validation::ValidationError;

use crate::config::ApiConfig;
use crate::operations::DexQueries;
use crate::pagination::{PaginationDriver, QueryExecutor};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Shared, read-only state handed to every handler
pub struct AppState {
    pub queries: DexQueries,
}

impl AppState {
    pub fn new(executor: Arc<dyn QueryExecutor>, config: &ApiConfig) -> Self {
        Self {
            queries: DexQueries::new(executor, PaginationDriver::default(), config.request_timeout),
        }
    }
}

#[derive(Debug)]
pub enum ServerError {
    Io(std::io::Error),
}

impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        ServerError::Io(err)
    }
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServerError::Io(e) => write!(f, "Server IO error: {}", e),
        }
    }
}

impl std::error::Error for ServerError {}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/assets/{asset_id}/pools", get(handlers::asset_pools))
        .route("/assets/{asset_id}/volume", get(handlers::asset_volume))
        .route("/blocks/{block_number}/swaps", get(handlers::block_swaps))
        .route(
            "/blocks/{block_number}/swapped-assets",
            get(handlers::block_swapped_assets),
        )
        .with_state(state)
}

/// Bind the configured address and serve until CTRL+C
pub async fn serve(config: &ApiConfig, executor: Arc<dyn QueryExecutor>) -> Result<(), ServerError> {
    let state = Arc::new(AppState::new(executor, config));
    let app = build_router(state);

    let addr = config.bind_address();
    let listener = TcpListener::bind(addr.as_str()).await?;
    log::info!("🌐 Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("✅ Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => log::info!("⚠️  Received CTRL+C, shutting down..."),
        Err(err) => log::error!("❌ Failed to listen for CTRL+C: {}", err),
    }
}
