//! Resort Concierge - conversational backend for a resort website
//!
//! Answers visitor questions about rooms, packages and FAQs by sending the
//! running transcript plus a knowledge prompt to a hosted LLM.

mod api;
mod chat;
mod config;
mod knowledge;
mod llm;
mod prompt;
mod transcript;

use api::{cors_layer, create_router, AppState};
use chat::{ChatService, CompletionGateway, StoreKnowledge};
use config::AppConfig;
use knowledge::KnowledgeStore;
use llm::{GeminiService, LoggingService};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use transcript::SessionStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "resort_concierge=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = AppConfig::from_env()?;

    // Open knowledge store
    let knowledge = if config.knowledge_db_path == ":memory:" {
        tracing::warn!("Using in-memory knowledge store");
        KnowledgeStore::open_in_memory()?
    } else {
        if let Some(parent) = PathBuf::from(&config.knowledge_db_path).parent() {
            std::fs::create_dir_all(parent)?;
        }
        tracing::info!(path = %config.knowledge_db_path, "Opening knowledge store");
        KnowledgeStore::open(&config.knowledge_db_path)?
    };

    if let Some(seed_path) = &config.knowledge_seed_path {
        let inserted = knowledge.seed_from_file(seed_path)?;
        tracing::info!(path = %seed_path.display(), inserted, "Applied knowledge seed");
    }

    // Generation service
    let gemini = GeminiService::new(
        config.gemini_api_key.clone(),
        &config.gemini_model,
        config.gemini_base_url.as_deref(),
    )?;
    tracing::info!(endpoint = %gemini.endpoint(), "Gemini endpoint configured");
    let llm = Arc::new(LoggingService::new(Arc::new(gemini)));
    tracing::info!(
        model = %config.gemini_model,
        history_window = config.history_window,
        "Generation service initialized"
    );

    let chat = ChatService::new(
        StoreKnowledge::new(knowledge, config.currency.clone()),
        CompletionGateway::new(llm),
        SessionStore::new(),
        config.history_window,
    );
    let state = AppState::new(chat);

    let app = create_router(state)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Resort concierge listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
