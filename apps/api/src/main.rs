mod config;
mod db;
mod errors;
mod generation;
mod interview;
mod llm_client;
mod models;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::generation::{LlmQuestionGenerator, QuestionGenerator};
use crate::interview::service::InterviewService;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::postgres::PgSessionStore;
use crate::store::SessionStore;

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

    info!("Starting Interview API v{}", env!("CARGO_PKG_VERSION"));

    // Durable session store: Postgres when configured, memory-only otherwise
    let store: Option<Arc<dyn SessionStore>> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            let store = PgSessionStore::new(pool);
            store.ensure_schema().await?;
            info!("Postgres session store initialized");
            Some(Arc::new(store))
        }
        None => {
            warn!("DATABASE_URL not set, sessions are stored in memory only");
            None
        }
    };

    // Question generation collaborator, enabled only when a key is configured
    let generator: Option<Arc<dyn QuestionGenerator>> = match &config.anthropic_api_key {
        Some(key) => {
            info!(
                "LLM question generation enabled (model: {})",
                llm_client::MODEL
            );
            Some(Arc::new(LlmQuestionGenerator::new(LlmClient::new(
                key.clone(),
            ))))
        }
        None => {
            info!("LLM question generation disabled, static fallback only");
            None
        }
    };

    let interviews = Arc::new(InterviewService::new(store, generator));

    let state = AppState {
        interviews,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
