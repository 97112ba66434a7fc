//! Tavily web search over HTTP.
//!
//! Wraps `reqwest::Client`; the API key is sent as a bearer token. A missing key is
//! reported on the first search, not at construction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{SearchClient, SearchError, SearchHit, SearchOptions};

/// Tavily search endpoint.
pub const TAVILY_SEARCH_URL: &str = "https://api.tavily.com/search";

#[derive(Serialize)]
struct TavilyRequest<'a> {
    query: &'a str,
    search_depth: &'a str,
    max_results: usize,
}

#[derive(Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

/// Tavily search client implementing `SearchClient`.
pub struct TavilySearch {
    client: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
}

impl TavilySearch {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_key)
    }

    /// Uses a caller-configured `reqwest::Client` (timeouts, proxies).
    pub fn with_client(client: reqwest::Client, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key: api_key.filter(|k| !k.is_empty()),
            endpoint: TAVILY_SEARCH_URL.to_string(),
        }
    }

    /// Overrides the endpoint URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl SearchClient for TavilySearch {
    async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<Vec<SearchHit>, SearchError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(SearchError::MissingCredential("TAVILY_API_KEY"))?;

        let body = TavilyRequest {
            query,
            search_depth: options.depth.as_str(),
            max_results: options.max_results,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TavilyResponse = response
            .json()
            .await
            .map_err(|e| SearchError::InvalidResponse(e.to_string()))?;
        tracing::debug!(query, hits = parsed.results.len(), "tavily search complete");
        Ok(parsed.results)
    }
}
