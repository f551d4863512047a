//! Completion gateway: instruction + transcript in, generated text out

use crate::llm::{LlmError, LlmMessage, LlmRequest, LlmService, MessageRole};
use crate::transcript::{Role, Turn};
use std::sync::Arc;

pub struct CompletionGateway {
    llm: Arc<dyn LlmService>,
}

impl CompletionGateway {
    pub fn new(llm: Arc<dyn LlmService>) -> Self {
        Self { llm }
    }

    pub fn model_id(&self) -> &str {
        self.llm.model_id()
    }

    /// The instruction first, then one message per turn in order
    pub fn build_request(instruction: &str, turns: &[Turn]) -> LlmRequest {
        LlmRequest {
            system: Some(instruction.to_string()),
            messages: turns
                .iter()
                .map(|turn| LlmMessage {
                    role: match turn.role {
                        Role::User => MessageRole::User,
                        Role::Model => MessageRole::Model,
                    },
                    text: turn.text.clone(),
                })
                .collect(),
        }
    }

    /// Returns the generated text verbatim. No retries.
    pub async fn generate(&self, instruction: &str, turns: &[Turn]) -> Result<String, LlmError> {
        let request = Self::build_request(instruction, turns);
        let response = self.llm.complete(&request).await?;
        Ok(response.text)
    }
}
