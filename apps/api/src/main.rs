mod config;
mod errors;
mod llm_client;
mod proposals;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{credential_status, Config, CredentialProvider, EnvCredentialProvider};
use crate::llm_client::{LlmClient, RetryPolicy};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Proposal API v{}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.environment.as_str());

    // The key is only reported here; handlers re-read it on every request
    let credentials = Arc::new(EnvCredentialProvider::default());
    let status = credential_status(credentials.as_ref());
    info!("API Key Status: {status}");
    if credentials.api_key().is_none() {
        warn!("OPENROUTER_API_KEY not found. Create a .env file with your API key for local development.");
    }

    // Initialize LLM client
    let llm = LlmClient::new(
        config.completion_url.clone(),
        config.referer_url.clone(),
        RetryPolicy::new(config.max_retries),
    )?;
    info!(
        "LLM client initialized (model: {}, referer: {}, max_retries: {})",
        llm_client::MODEL,
        config.referer_url,
        config.max_retries
    );

    // Build app state
    let state = AppState {
        completion: Arc::new(llm),
        credentials,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = config.bind_addr().parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
