//! Chat turn orchestration

use super::gateway::CompletionGateway;
use super::traits::KnowledgeSource;
use crate::knowledge::KnowledgeError;
use crate::llm::LlmError;
use crate::prompt;
use crate::transcript::{SessionStore, Turn};
use thiserror::Error;

/// Prefix of every failure reply; the error detail follows it
pub const FALLBACK_REPLY: &str = "Sorry, I'm unable to respond right now. Please try again later.";

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("{0}")]
    DataSource(#[from] KnowledgeError),
    #[error("{0}")]
    Generation(#[from] LlmError),
}

impl ChatError {
    pub fn kind(&self) -> &'static str {
        match self {
            ChatError::DataSource(_) => "data_source",
            ChatError::Generation(_) => "generation",
        }
    }

    /// User-facing apology carrying the raw error detail
    pub fn fallback_reply(&self) -> String {
        format!("{FALLBACK_REPLY} {self}")
    }
}

/// Successful turn result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub reply: String,
    pub session_id: String,
}

/// Runs one chat turn per call against a session transcript
pub struct ChatService<K>
where
    K: KnowledgeSource,
{
    knowledge: K,
    gateway: CompletionGateway,
    sessions: SessionStore,
    history_window: usize,
}

impl<K> ChatService<K>
where
    K: KnowledgeSource,
{
    pub fn new(
        knowledge: K,
        gateway: CompletionGateway,
        sessions: SessionStore,
        history_window: usize,
    ) -> Self {
        Self {
            knowledge,
            gateway,
            sessions,
            history_window,
        }
    }

    #[allow(dead_code)] // Used in tests
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Handle one user message.
    ///
    /// The session is locked only to record turns. The user turn and the
    /// history window are taken under the lock, then knowledge reads and
    /// generation run unlocked, so a stalled upstream call never blocks other
    /// callers of the same session. Concurrent turns in one session may
    /// therefore interleave. The user turn is kept on failure; the model turn
    /// is only appended on success.
    pub async fn handle(&self, session_id: &str, message: &str) -> Result<ChatReply, ChatError> {
        let session = self.sessions.session(session_id);
        let history = {
            let mut transcript = session.lock().await;
            transcript.append(Turn::user(message));
            transcript.window(self.history_window).to_vec()
        };

        match self.respond(&history).await {
            Ok(reply) => {
                let turns = {
                    let mut transcript = session.lock().await;
                    transcript.append(Turn::model(reply.clone()));
                    transcript.len()
                };
                tracing::info!(
                    session_id = %session_id,
                    model = %self.gateway.model_id(),
                    turns,
                    sessions = self.sessions.session_count(),
                    "Chat turn completed"
                );
                Ok(ChatReply {
                    reply,
                    session_id: session_id.to_string(),
                })
            }
            Err(e) => {
                tracing::warn!(
                    session_id = %session_id,
                    kind = e.kind(),
                    error = %e,
                    "Chat turn failed"
                );
                Err(e)
            }
        }
    }

    async fn respond(&self, history: &[Turn]) -> Result<String, ChatError> {
        let rooms = self.knowledge.rooms_block().await?;
        let packages = self.knowledge.packages_block().await?;
        let instruction = prompt::compose(&rooms, &packages);

        let reply = self.gateway.generate(&instruction, history).await?;
        Ok(reply)
    }
}
