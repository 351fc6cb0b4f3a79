mod config;
mod errors;
mod llm_client;
mod privacy;
mod routes;
mod screening;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::prompts::SYSTEM_NAME;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::screening::registry::SessionRegistry;
use crate::state::AppState;
use crate::store::CandidateStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed numeric env vars)
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

    info!("Starting {} API v{}", SYSTEM_NAME, env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(&config.ollama_host, &config.ollama_model, config.llm_timeout)?;
    info!(
        "LLM client initialized (host: {}, model: {})",
        config.ollama_host,
        llm.model()
    );

    // Initialize candidate store
    let store = CandidateStore::open(&config.candidates_path)?;
    info!("Candidate store at {}", store.path().display());

    // Build app state
    let state = AppState {
        sessions: Arc::new(SessionRegistry::default()),
        generator: Arc::new(llm),
        store,
        config: config.clone(),
    };

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
