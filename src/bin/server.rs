//! ARS HTTP Server Binary
//!
//! This is the main entry point for the asteroid ranging REST API server.
//! It initializes the delivery tracker and dispatcher, sets up the HTTP
//! router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin ars-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `RUST_LOG`: Log level (default: info)
//! - `ARS_DELAY_MIN_SECS` / `ARS_DELAY_MAX_SECS`: pre-computation delay bounds (default: 5.0 / 10.0)
//! - `ARS_CALLBACK_TIMEOUT_SECS`: callback request timeout (default: 30)
//! - `ARS_QUEUE_CAPACITY`: calculation intake queue capacity (default: 64)
//! - `ARS_MAX_CONCURRENT`: concurrent calculation limit (default: 8)

use std::env;
use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use ars_rust::config::ServiceConfig;
use ars_rust::http::{create_router, AppState};
use ars_rust::services::{CallbackClient, DeliveryTracker, Dispatcher};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting ARS HTTP Server");

    let config = ServiceConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;
    info!(?config, "Service configuration loaded");

    // Wire up the service layer: tracker, callback client, dispatcher
    let tracker = DeliveryTracker::new();
    let client = CallbackClient::new(config.callback_timeout)?;
    let dispatcher = Dispatcher::start(&config, tracker.clone(), client);

    // Create application state
    let state = AppState::new(dispatcher, tracker);

    // Create router with all endpoints
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
