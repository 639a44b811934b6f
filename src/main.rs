//! Skiff: a minimal HTTP service for demonstrating multi-stage container builds.
//!
//! This is the application entry point. It captures the process start
//! instant, initializes tracing, reads configuration from the environment,
//! builds the router, and runs the server until a termination signal.

use std::net::SocketAddr;
use std::time::Instant;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use skiff::config::{AppConfig, DEFAULT_LOG_FILTER};
use skiff::http::{start_server, HttpTimeouts};
use skiff::routes::create_router;
use skiff::state::AppState;

/// Skiff: a minimal container-demo HTTP service
#[derive(Parser, Debug)]
#[command(name = "skiff", version, about)]
struct Args {
    /// Log level filter (e.g., "skiff=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Captured before anything else so uptime covers the whole process life
    let started = Instant::now();

    // Parse command line arguments
    let args = Args::parse();

    // Read configuration from the environment
    let config = AppConfig::from_env()?;

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&log_filter));
    match config.log_format.as_str() {
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        _ => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    tracing::info!(
        port = config.port,
        app_version = %config.app_version,
        "loaded configuration"
    );

    let timeouts = HttpTimeouts::default();
    let state = AppState::new(config.clone(), started);
    let app = create_router(state, timeouts);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    if let Err(err) = start_server(app, addr, timeouts).await {
        tracing::error!(error = %err, "server failed to start");
        return Err(err.into());
    }

    Ok(())
}
