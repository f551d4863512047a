//! Mock implementations for testing
//!
//! These mocks let the chat flow run without a network or database.

use super::traits::KnowledgeSource;
use crate::knowledge::KnowledgeError;
use crate::llm::{LlmError, LlmRequest, LlmResponse, LlmService};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

// ============================================================================
// Mock LLM Service
// ============================================================================

/// Mock LLM service that returns queued responses
pub struct MockLlmService {
    responses: Mutex<VecDeque<Result<LlmResponse, LlmError>>>,
    model_id: String,
    /// Record of all requests made
    pub requests: Mutex<Vec<LlmRequest>>,
}

#[allow(dead_code)]
impl MockLlmService {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            model_id: model_id.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful response with the given text
    pub fn queue_text(&self, text: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(LlmResponse::from_text(text)));
    }

    /// Queue an error response
    pub fn queue_error(&self, error: LlmError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmService for MockLlmService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::network("No mock response queued")))
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

// ============================================================================
// Knowledge stubs
// ============================================================================

/// Fixed listings
pub struct StaticKnowledge {
    pub rooms: String,
    pub packages: String,
}

#[async_trait]
impl KnowledgeSource for StaticKnowledge {
    async fn rooms_block(&self) -> Result<String, KnowledgeError> {
        Ok(self.rooms.clone())
    }

    async fn packages_block(&self) -> Result<String, KnowledgeError> {
        Ok(self.packages.clone())
    }
}

/// Knowledge source whose store is unreachable
pub struct UnreachableKnowledge;

#[async_trait]
impl KnowledgeSource for UnreachableKnowledge {
    async fn rooms_block(&self) -> Result<String, KnowledgeError> {
        Err(KnowledgeError::Sqlite(rusqlite::Error::InvalidPath(
            "/unreachable/knowledge.db".into(),
        )))
    }

    async fn packages_block(&self) -> Result<String, KnowledgeError> {
        self.rooms_block().await
    }
}

// ============================================================================
// Stalling LLM Service
// ============================================================================

/// Never answers a request whose last message matches `stall_on`; echoes
/// every other one as `reply to <text>`
pub struct StallingLlmService {
    stall_on: String,
}

impl StallingLlmService {
    pub fn new(stall_on: impl Into<String>) -> Self {
        Self {
            stall_on: stall_on.into(),
        }
    }
}

#[async_trait]
impl LlmService for StallingLlmService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let last = request
            .messages
            .last()
            .map(|m| m.text.clone())
            .unwrap_or_default();
        if last == self.stall_on {
            std::future::pending::<()>().await;
        }
        Ok(LlmResponse::from_text(format!("reply to {last}")))
    }

    fn model_id(&self) -> &str {
        "stalling-model"
    }
}
