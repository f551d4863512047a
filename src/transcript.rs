//! Conversation transcripts, partitioned by session
//!
//! A transcript only ever grows. Each session owns its own transcript behind
//! an async mutex; callers that send no session id share `default`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Session used by callers that do not identify themselves
pub const DEFAULT_SESSION: &str = "default";

/// Longer client-supplied session ids are truncated to this many characters
pub const MAX_SESSION_ID_LEN: usize = 128;

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One message in a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// Append-only ordered sequence of turns
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn snapshot(&self) -> Vec<Turn> {
        self.turns.clone()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[allow(dead_code)] // API completeness
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The most recent `limit` turns, trimmed so the window opens on a user
    /// turn. `limit == 0` returns everything.
    pub fn window(&self, limit: usize) -> &[Turn] {
        if limit == 0 || self.turns.len() <= limit {
            return &self.turns;
        }
        let mut start = self.turns.len() - limit;
        while start < self.turns.len() && self.turns[start].role == Role::Model {
            start += 1;
        }
        &self.turns[start..]
    }
}

pub type SharedTranscript = Arc<tokio::sync::Mutex<Transcript>>;

/// Session id -> transcript
#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, SharedTranscript>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the transcript for a session, creating it on first use
    pub fn session(&self, id: &str) -> SharedTranscript {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        sessions.entry(id.to_string()).or_default().clone()
    }

    /// Copy of a session's turns; unknown sessions are empty
    #[allow(dead_code)] // Used in tests
    pub async fn snapshot(&self, id: &str) -> Vec<Turn> {
        let transcript = {
            let sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
            sessions.get(id).cloned()
        };
        match transcript {
            Some(transcript) => transcript.lock().await.snapshot(),
            None => Vec::new(),
        }
    }

    pub fn session_count(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Map a requested session id to the one actually used
pub fn resolve_session_id(requested: Option<&str>) -> String {
    requested
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .unwrap_or(DEFAULT_SESSION)
        .chars()
        .take(MAX_SESSION_ID_LEN)
        .collect()
}
