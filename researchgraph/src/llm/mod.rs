//! LLM client abstraction for the planner and writer nodes.
//!
//! Nodes depend on a callable that takes role-tagged messages and returns one text
//! blob; this module defines the trait, a mock, and (feature `openai`) `ChatOpenAI`.

mod mock;

#[cfg(feature = "openai")]
mod openai;

pub use mock::MockLlm;

#[cfg(feature = "openai")]
pub use openai::ChatOpenAI;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::message::Message;

/// Response from an LLM completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LlmResponse {
    /// Assistant message content (plain text).
    pub content: String,
}

/// LLM client: given messages, returns assistant text.
///
/// Errors are node-fatal: the planner and writer propagate them and the run fails.
///
/// **Interaction**: Used by `PlannerNode` and `WriterNode`.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Invoke one turn: read messages, return assistant content.
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError>;
}
