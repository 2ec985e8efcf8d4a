//! Learning assistant - a mock chat helper for learning-path pages
//!
//! Serves the static pages and a small conversation runtime whose replies
//! come from keyword matching over the chat history.

mod api;
mod assistant;
mod catalog;
mod config;
mod conversation;
mod runtime;
mod state_machine;

use api::{create_router, AppState};
use config::AppConfig;
use runtime::RuntimeManager;
use std::net::SocketAddr;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "learnpath_assistant=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = AppConfig::from_env();
    tracing::info!(
        port = config.port,
        reply_delay_ms = u64::try_from(config.reply_delay.as_millis()).unwrap_or(u64::MAX),
        idle_timeout_s = config.idle_timeout.as_secs(),
        ui_dir = %config.ui_dir.display(),
        "Configuration loaded"
    );

    // Create application state
    let runtime = RuntimeManager::with_idle_timeout(config.reply_delay, config.idle_timeout);
    let state = AppState::new(runtime, config.ui_dir);

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let app = create_router(state)
        .layer(cors)
        .layer(compression)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Learning assistant listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
