//! OpenAI Chat Completions client implementing `LlmClient` (ChatOpenAI).
//!
//! Uses the OpenAI-compatible Chat Completions API. The API key is checked when the
//! client is first invoked, not when it is built, so a missing key fails the run
//! that needs it with `AgentError::MissingCredential`.
//!
//! **Interaction**: Implements `LlmClient`; used by the planner and writer nodes.
//! Depends on `async_openai` (feature `openai`).

use async_trait::async_trait;

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse};
use crate::message::Message;

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestUserMessage, CreateChatCompletionRequestArgs,
    },
    Client,
};

/// OpenAI Chat Completions client implementing `LlmClient`.
pub struct ChatOpenAI {
    /// `None` when no API key was configured.
    client: Option<Client<OpenAIConfig>>,
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl ChatOpenAI {
    /// Build client from an optional API key and a base URL.
    pub fn new(api_key: Option<&str>, api_base: &str, model: impl Into<String>) -> Self {
        let client = api_key.filter(|k| !k.is_empty()).map(|key| {
            Client::with_config(
                OpenAIConfig::new()
                    .with_api_key(key)
                    .with_api_base(api_base),
            )
        });
        Self {
            client,
            model: model.into(),
            temperature: None,
            max_tokens: None,
        }
    }

    /// Build client with custom config (e.g. custom API key or base URL).
    pub fn with_config(config: OpenAIConfig, model: impl Into<String>) -> Self {
        Self {
            client: Some(Client::with_config(config)),
            model: model.into(),
            temperature: None,
            max_tokens: None,
        }
    }

    /// Set temperature (0–2). Lower values are more deterministic.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Cap the completion length in tokens.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Convert our `Message` list to OpenAI request messages.
    fn messages_to_request(messages: &[Message]) -> Vec<ChatCompletionRequestMessage> {
        messages
            .iter()
            .map(|m| match m {
                Message::System(s) => ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessage::from(s.as_str()),
                ),
                Message::User(s) => ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessage::from(s.as_str()),
                ),
                Message::Assistant(s) => {
                    ChatCompletionRequestMessage::Assistant((s.as_str()).into())
                }
            })
            .collect()
    }
}

#[async_trait]
impl LlmClient for ChatOpenAI {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError> {
        let client = self
            .client
            .as_ref()
            .ok_or(AgentError::MissingCredential("OPENAI_API_KEY"))?;

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.model.clone());
        args.messages(Self::messages_to_request(messages));
        if let Some(t) = self.temperature {
            args.temperature(t);
        }
        if let Some(n) = self.max_tokens {
            args.max_completion_tokens(n);
        }

        let request = args.build().map_err(|e| {
            AgentError::ExecutionFailed(format!("OpenAI request build failed: {}", e))
        })?;

        let response = client
            .chat()
            .create(request)
            .await
            .map_err(|e| AgentError::ExecutionFailed(format!("OpenAI API error: {}", e)))?;

        let choice =
            response.choices.into_iter().next().ok_or_else(|| {
                AgentError::ExecutionFailed("OpenAI returned no choices".to_string())
            })?;

        tracing::debug!(model = %self.model, "chat completion received");
        Ok(LlmResponse {
            content: choice.message.content.unwrap_or_default(),
        })
    }
}
