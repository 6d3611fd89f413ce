mod config;
mod errors;
mod generation;
mod ingest;
mod llm_client;
mod models;
mod render;
mod routes;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting atsgen v{}", env!("CARGO_PKG_VERSION"));

    // Provider clients and reader proxy; credentials arrive per request
    let state = AppState::from_config(config.clone())?;
    info!(
        "LLM providers ready (gemini: {}, openai: {})",
        llm_client::gemini::MODEL,
        llm_client::openai::MODEL
    );
    info!(
        "Job reader: {} (timeout {}s)",
        config.reader_base_url, config.fetch_timeout_secs
    );
    info!("Session idle TTL: {} minutes", config.session_ttl_minutes);

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
