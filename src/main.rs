//! 20 Questions - a guessing game served over HTTP
//!
//! The server thinks of an object and the player narrows it down with
//! yes/no questions. An LLM names the object, answers the questions and
//! gives hints; every LLM failure degrades to a fallback.

mod api;
mod config;
mod game;
mod llm;
mod oracle;
mod runtime;

use api::{create_router, AppState};
use config::ServerConfig;
use llm::{LlmConfig, ModelRegistry};
use oracle::{Collaborator, LlmCollaborator, OfflineCollaborator, Oracle};
use runtime::SessionManager;
use std::net::SocketAddr;
use std::sync::Arc;
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
                .unwrap_or_else(|_| "twenty_questions=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = ServerConfig::from_env()?;
    tracing::info!(
        variant = config.variant.name(),
        question_limit = config.game.question_limit,
        hint_budget = config.game.hint_budget,
        category = ?config.category,
        max_sessions = config.max_sessions,
        oracle_timeout_secs = config.oracle_timeout.as_secs(),
        "Configuration loaded"
    );

    // Initialize LLM registry
    let llm_config = LlmConfig::from_env();
    let llm_registry = Arc::new(ModelRegistry::new(&llm_config));

    let collaborator: Arc<dyn Collaborator> = match llm_registry.default() {
        Some(service) => {
            tracing::info!(
                models = ?llm_registry.available_models(),
                default = %llm_registry.default_model_id(),
                "LLM registry initialized"
            );
            Arc::new(LlmCollaborator::new(service, config.variant.prompts()))
        }
        None => {
            tracing::warn!(
                "No LLM API keys configured. Set ANTHROPIC_API_KEY, OPENAI_API_KEY or \
                 LLM_GATEWAY; playing with fallback objects and hints."
            );
            Arc::new(OfflineCollaborator)
        }
    };

    let oracle =
        Oracle::new(collaborator, config.oracle_timeout).with_category(config.category.clone());
    let manager = SessionManager::new(oracle, config.game, config.max_sessions);
    let state = AppState::new(manager, config.variant, llm_registry);

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
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(compression);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("20 Questions server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
