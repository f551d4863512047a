//! HTTP API for the resort concierge

mod handlers;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::chat::ProductionChatService;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ProductionChatService>,
}

impl AppState {
    pub fn new(chat: ProductionChatService) -> Self {
        Self {
            chat: Arc::new(chat),
        }
    }
}

/// Any origin, method and header
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
