//! uniflow API server
//!
//! Serves Uniswap v3 pool, volume and block-swap aggregates over HTTP.
//!
//! Usage:
//!   cargo run --release --bin api_server
//!
//! Environment variables:
//!   UNISWAP_V3_ENDPOINT - Subgraph GraphQL endpoint
//!   SERVER_HOST / SERVER_PORT - Bind address (default: 0.0.0.0:8080)
//!   UPSTREAM_TIMEOUT_SECS - Per round trip timeout (default: 10)
//!   REQUEST_TIMEOUT_SECS - Whole request deadline (default: 60)

use dotenv::dotenv;
use log::{error, info};
use std::sync::Arc;
use uniflow::api;
use uniflow::config::ApiConfig;
use uniflow::pagination::PAGE_SIZE;
use uniflow::subgraph::GraphClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let config = ApiConfig::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.rust_log.as_str()))
        .target(env_logger::Target::Stderr)
        .init();

    info!("🚀 Starting uniflow API...");
    info!("📊 Configuration:");
    info!("   ├─ Subgraph: {}", config.endpoint);
    info!("   ├─ Bind: {}", config.bind_address());
    info!("   ├─ Page size: {}", PAGE_SIZE);
    info!("   ├─ Upstream timeout: {}s", config.upstream_timeout.as_secs());
    info!("   └─ Request timeout: {}s", config.request_timeout.as_secs());

    let client = GraphClient::new(&config.endpoint, config.upstream_timeout)?;

    if let Err(e) = api::serve(&config, Arc::new(client)).await {
        error!("❌ Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
