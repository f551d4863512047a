//! HTTP request handlers

use super::types::{ChatErrorResponse, ChatRequest, ChatResponse, VersionResponse};
use super::AppState;
use crate::chat::{ChatError, ChatReply};
use crate::transcript::resolve_session_id;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Chat
// ============================================================

async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ChatFailure> {
    let session_id = resolve_session_id(req.session_id.as_deref());

    let ChatReply { reply, session_id } = state
        .chat
        .handle(&session_id, &req.message)
        .await
        .map_err(|error| ChatFailure {
            session_id: session_id.clone(),
            error,
        })?;

    Ok(Json(ChatResponse { reply, session_id }))
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> Json<VersionResponse> {
    Json(VersionResponse {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

// ============================================================
// Error Handling
// ============================================================

/// A failed turn, rendered as an apology plus a non-200 status
struct ChatFailure {
    session_id: String,
    error: ChatError,
}

impl IntoResponse for ChatFailure {
    fn into_response(self) -> Response {
        let status = match self.error {
            ChatError::DataSource(_) => StatusCode::SERVICE_UNAVAILABLE,
            ChatError::Generation(_) => StatusCode::BAD_GATEWAY,
        };

        let body = Json(ChatErrorResponse {
            reply: self.error.fallback_reply(),
            session_id: self.session_id,
            error: self.error.kind().to_string(),
        });
        (status, body).into_response()
    }
}
