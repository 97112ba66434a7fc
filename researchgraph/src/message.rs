//! Chat message: role-tagged text exchanged with the LLM and kept in state history.

use serde::{Deserialize, Serialize};

/// One chat turn. The role is the variant; content is plain text.
///
/// **Interaction**: Sent to `LlmClient::invoke`; appended to `ResearchState::messages`
/// by the caller (user turn) and by the writer node (assistant turn).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", content = "content", rename_all = "lowercase")]
pub enum Message {
    System(String),
    User(String),
    Assistant(String),
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self::System(content.into())
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::User(content.into())
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::Assistant(content.into())
    }

    /// Role name as used by chat APIs: `system`, `user` or `assistant`.
    pub fn role(&self) -> &'static str {
        match self {
            Self::System(_) => "system",
            Self::User(_) => "user",
            Self::Assistant(_) => "assistant",
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Self::System(s) | Self::User(s) | Self::Assistant(s) => s,
        }
    }
}
