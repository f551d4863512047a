//! Trait abstractions for chat I/O
//!
//! These traits let the chat service run against mock knowledge sources.

use crate::knowledge::{render_packages, render_rooms, KnowledgeError, KnowledgeStore};
use async_trait::async_trait;

/// Source of the rendered listings embedded in the prompt
#[async_trait]
pub trait KnowledgeSource: Send + Sync {
    /// Rendered room listing, one line per room
    async fn rooms_block(&self) -> Result<String, KnowledgeError>;

    /// Rendered package listing, one line per package
    async fn packages_block(&self) -> Result<String, KnowledgeError>;
}

// ============================================================================
// Production Adapter
// ============================================================================

/// Adapter to use `KnowledgeStore` as `KnowledgeSource`
#[derive(Clone)]
pub struct StoreKnowledge {
    store: KnowledgeStore,
    currency: String,
}

impl StoreKnowledge {
    pub fn new(store: KnowledgeStore, currency: impl Into<String>) -> Self {
        Self {
            store,
            currency: currency.into(),
        }
    }
}

#[async_trait]
impl KnowledgeSource for StoreKnowledge {
    async fn rooms_block(&self) -> Result<String, KnowledgeError> {
        let rooms = self.store.list_rooms()?;
        Ok(render_rooms(&rooms, &self.currency))
    }

    async fn packages_block(&self) -> Result<String, KnowledgeError> {
        let packages = self.store.list_packages()?;
        Ok(render_packages(&packages, &self.currency))
    }
}
