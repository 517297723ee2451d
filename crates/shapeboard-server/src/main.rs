//! Shapeboard Drawing Store
//!
//! Keeps saved drawings per user and serves them over HTTP.
//!
//! ## Endpoints
//!
//! ```text
//! POST /api/drawings             { "username": "...", "data": { "drawingName": "...", "shapes": [...] } }
//! GET  /api/drawings/{username}  [ { "id": 1, "data": {...}, "timestamp": "..." }, ... ]
//! GET  /health                   ok
//! ```

mod api;
mod config;

use api::AppState;
use config::ServerConfig;
use shapeboard_core::FileGateway;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shapeboard_server=info,shapeboard_core=info,tower_http=info".into()),
        )
        .init();

    let config = ServerConfig::from_env();
    let gateway = match &config.data_dir {
        Some(dir) => FileGateway::new(dir.clone())?,
        None => FileGateway::default_location()?,
    };
    info!("Storing drawings in {}", gateway.base_path().display());

    let state = Arc::new(AppState::new(Arc::new(gateway)));
    let app = api::router(state);

    let addr = config.addr();
    info!("Shapeboard drawing store listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
