//! Search agent node: runs the planned queries against the search provider.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::Node;
use crate::retry::RetryPolicy;
use crate::search::{search_with_retry, SearchClient, SearchError, SearchOptions};
use crate::state::{ResearchState, SearchResult, StateUpdate};

use super::SEARCH_AGENT;

/// Keeps the first result for each URL, in order.
pub fn dedup_by_url(results: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut seen = HashSet::new();
    results
        .into_iter()
        .filter(|r| seen.insert(r.url.clone()))
        .collect()
}

/// Search agent node: writes `search_results` and `status.search_agent`.
///
/// Each query is retried per the node's `RetryPolicy`; a query that still fails is
/// logged and skipped. A missing API key is not retried and fails the run.
///
/// **Interaction**: Implements `Node<ResearchState>`; calls `SearchClient` through
/// `search_with_retry`.
pub struct SearchAgentNode {
    client: Arc<dyn SearchClient>,
    options: SearchOptions,
    retry: RetryPolicy,
}

impl SearchAgentNode {
    pub fn new(client: Arc<dyn SearchClient>) -> Self {
        Self {
            client,
            options: SearchOptions::default(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

/// Planned queries, else the user query, else nothing.
fn queries_for(state: &ResearchState) -> Vec<String> {
    let planned: Vec<String> = state
        .plan
        .search_queries
        .iter()
        .map(|q| q.trim())
        .filter(|q| !q.is_empty())
        .map(str::to_string)
        .collect();
    if !planned.is_empty() {
        return planned;
    }
    let query = state.query.trim();
    if query.is_empty() {
        Vec::new()
    } else {
        vec![query.to_string()]
    }
}

#[async_trait]
impl Node<ResearchState> for SearchAgentNode {
    fn id(&self) -> &str {
        SEARCH_AGENT
    }

    async fn run(&self, state: &ResearchState) -> Result<StateUpdate, AgentError> {
        let queries = queries_for(state);
        if queries.is_empty() {
            return Ok(StateUpdate::new()
                .with_search_results(Vec::new())
                .with_status(SEARCH_AGENT, "⚠️ No search queries"));
        }

        let mut all = Vec::new();
        let mut succeeded = 0usize;
        for query in &queries {
            match search_with_retry(self.client.as_ref(), query, &self.options, &self.retry).await {
                Ok(hits) => {
                    succeeded += 1;
                    tracing::info!(query = %query, results = hits.len(), "search complete");
                    all.extend(hits.into_iter().map(|h| SearchResult::from_hit(h, query)));
                }
                Err(SearchError::MissingCredential(key)) => {
                    return Err(AgentError::MissingCredential(key));
                }
                Err(e) => {
                    tracing::error!(query = %query, error = %e, "all search attempts failed");
                }
            }
        }

        let results = dedup_by_url(all);
        let status = if succeeded == 0 {
            format!("⚠️ All {} search queries failed", queries.len())
        } else {
            format!("✅ Found {} results", results.len())
        };

        Ok(StateUpdate::new()
            .with_search_results(results)
            .with_status(SEARCH_AGENT, status))
    }
}
