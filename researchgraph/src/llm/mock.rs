//! Mock LLM for tests and offline runs.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::AgentError;
use crate::message::Message;

use super::{LlmClient, LlmResponse};

type ReplyFn = dyn Fn(&[Message]) -> Result<String, String> + Send + Sync;

/// Mock LLM: answers from a fixed text or a closure, and records every request.
///
/// **Interaction**: Implements `LlmClient`; stands in for `ChatOpenAI` in node and
/// pipeline tests.
pub struct MockLlm {
    reply: Arc<ReplyFn>,
    calls: Mutex<Vec<Vec<Message>>>,
}

impl MockLlm {
    /// Always answers `content`.
    pub fn with_response(content: impl Into<String>) -> Self {
        let content = content.into();
        Self::from_fn(move |_| Ok(content.clone()))
    }

    /// Always fails with `AgentError::ExecutionFailed(message)`.
    pub fn failing(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::from_fn(move |_| Err(message.clone()))
    }

    /// Answers with `f(messages)`; `Err` becomes `AgentError::ExecutionFailed`.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&[Message]) -> Result<String, String> + Send + Sync + 'static,
    {
        Self {
            reply: Arc::new(f),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Messages of every invoke so far, oldest first.
    pub fn calls(&self) -> Vec<Vec<Message>> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(messages.to_vec());
        }
        (self.reply)(messages)
            .map(|content| LlmResponse { content })
            .map_err(AgentError::ExecutionFailed)
    }
}
