//! Web search collaborator used by the search agent.
//!
//! `SearchClient` is the seam; `TavilySearch` calls the Tavily HTTP API and
//! `MockSearch` scripts outcomes for tests.

mod mock;
mod tavily;

pub use mock::MockSearch;
pub use tavily::{TavilySearch, TAVILY_SEARCH_URL};

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::nullable::null_as_default;
use crate::retry::RetryPolicy;

/// One hit returned by the search provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub score: f64,
}

/// How hard the provider should search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchDepth {
    Basic,
    #[default]
    Advanced,
}

impl SearchDepth {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for SearchDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchDepth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "advanced" => Ok(Self::Advanced),
            other => Err(format!("unknown search depth '{}'", other)),
        }
    }
}

/// Per-call search options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOptions {
    pub max_results: usize,
    pub depth: SearchDepth,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_results: 5,
            depth: SearchDepth::Advanced,
        }
    }
}

/// Search failure for one query.
#[derive(Debug, Error)]
pub enum SearchError {
    /// No API key configured. Not retried.
    #[error("missing credential: {0} is not set")]
    MissingCredential(&'static str),

    /// Connection, timeout, or body read failure.
    #[error("search transport error: {0}")]
    Transport(String),

    /// Provider answered with a non-success status.
    #[error("search provider returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Response body was not the expected JSON.
    #[error("invalid search response: {0}")]
    InvalidResponse(String),
}

impl SearchError {
    /// Whether another attempt could succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::MissingCredential(_))
    }
}

/// Web search provider: one query in, ranked hits out. An empty list is a valid answer.
///
/// **Interaction**: Used by `SearchAgentNode` through `search_with_retry`.
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<Vec<SearchHit>, SearchError>;
}

/// Runs one query under `policy`. Retries every error except a missing credential.
pub async fn search_with_retry(
    client: &dyn SearchClient,
    query: &str,
    options: &SearchOptions,
    policy: &RetryPolicy,
) -> Result<Vec<SearchHit>, SearchError> {
    policy
        .run(
            |_| client.search(query, options),
            SearchError::is_retryable,
        )
        .await
}
