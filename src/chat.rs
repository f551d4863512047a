//! Chat turn handling
//!
//! Ties the knowledge store, prompt composer, session transcripts and the
//! generation gateway into a single request/response turn.

mod gateway;
mod service;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use gateway::CompletionGateway;
pub use service::{ChatError, ChatReply, ChatService};
pub use traits::*;

/// Type alias for production chat service with concrete implementations
pub type ProductionChatService = ChatService<StoreKnowledge>;
