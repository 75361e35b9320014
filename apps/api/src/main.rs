mod auth;
mod config;
mod errors;
mod interview;
mod llm_client;
mod pipeline;
mod resume;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::StaticTokenVerifier;
use crate::config::Config;
use crate::llm_client::transport::ReqwestTransport;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting HireBot API v{}", env!("CARGO_PKG_VERSION"));

    // Provider is resolved once; generation stays disabled without one.
    match &config.provider {
        Some(provider) => info!(
            "LLM provider: {} ({:?}, model: {})",
            provider.source, provider.dialect, provider.model
        ),
        None => warn!("No LLM provider credential configured; AI endpoints will return 500"),
    }
    let transport = ReqwestTransport::new().context("Failed to build HTTP client")?;
    let llm = LlmClient::new(Arc::new(transport), config.provider.clone());

    let verifier = StaticTokenVerifier::new(config.auth_tokens.clone());
    if verifier.is_empty() {
        warn!("AUTH_TOKENS is empty; every authenticated request will be rejected");
    }

    let state = AppState {
        llm,
        verifier: Arc::new(verifier),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config)?);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Restricts CORS to `FRONTEND_URL` when set; permissive otherwise (development).
fn cors_layer(config: &Config) -> Result<CorsLayer> {
    let Some(origin) = &config.frontend_url else {
        return Ok(CorsLayer::permissive());
    };

    let origin = origin
        .parse::<HeaderValue>()
        .with_context(|| format!("FRONTEND_URL '{origin}' is not a valid origin"))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true))
}
