//! API request and response types

use serde::{Deserialize, Serialize};

/// Request to send a chat message
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Conversation to continue; omitted means the shared default session
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Response for a completed chat turn
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub session_id: String,
}

/// Response for a failed chat turn; `reply` stays human readable
#[derive(Debug, Serialize)]
pub struct ChatErrorResponse {
    pub reply: String,
    pub session_id: String,
    pub error: String,
}

/// Response for the version endpoint
#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub name: &'static str,
    pub version: &'static str,
}
