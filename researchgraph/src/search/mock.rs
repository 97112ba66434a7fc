//! Scripted search client for tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{SearchClient, SearchError, SearchHit, SearchOptions};

enum Script {
    Always(Vec<SearchHit>),
    AlwaysFail(String),
    Sequence(VecDeque<Result<Vec<SearchHit>, SearchError>>),
}

/// Search client answering from per-query scripts. Unscripted queries return no hits;
/// an exhausted sequence keeps returning no hits.
///
/// **Interaction**: Implements `SearchClient`; stands in for `TavilySearch` in tests.
#[derive(Default)]
pub struct MockSearch {
    scripts: Mutex<HashMap<String, Script>>,
    calls: Mutex<HashMap<String, usize>>,
    order: Mutex<Vec<String>>,
    last_options: Mutex<Option<SearchOptions>>,
}

impl MockSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// `query` always returns `hits`.
    pub fn with_hits(self, query: impl Into<String>, hits: Vec<SearchHit>) -> Self {
        self.script(query.into(), Script::Always(hits))
    }

    /// `query` always fails with a transport error.
    pub fn with_failure(self, query: impl Into<String>, message: impl Into<String>) -> Self {
        self.script(query.into(), Script::AlwaysFail(message.into()))
    }

    /// `query` returns `outcomes` one per call, in order.
    pub fn with_outcomes(
        self,
        query: impl Into<String>,
        outcomes: Vec<Result<Vec<SearchHit>, SearchError>>,
    ) -> Self {
        self.script(query.into(), Script::Sequence(outcomes.into()))
    }

    fn script(self, query: String, script: Script) -> Self {
        if let Ok(mut scripts) = self.scripts.lock() {
            scripts.insert(query, script);
        }
        self
    }

    /// Number of calls made for `query`, counting retries.
    pub fn calls(&self, query: &str) -> usize {
        self.calls
            .lock()
            .ok()
            .and_then(|c| c.get(query).copied())
            .unwrap_or(0)
    }

    /// Queries in call order, retries included.
    pub fn queries(&self) -> Vec<String> {
        self.order.lock().map(|o| o.clone()).unwrap_or_default()
    }

    pub fn last_options(&self) -> Option<SearchOptions> {
        self.last_options.lock().ok().and_then(|o| o.clone())
    }
}

#[async_trait]
impl SearchClient for MockSearch {
    async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<Vec<SearchHit>, SearchError> {
        if let Ok(mut calls) = self.calls.lock() {
            *calls.entry(query.to_string()).or_default() += 1;
        }
        if let Ok(mut order) = self.order.lock() {
            order.push(query.to_string());
        }
        if let Ok(mut last) = self.last_options.lock() {
            *last = Some(options.clone());
        }

        let mut scripts = self
            .scripts
            .lock()
            .map_err(|e| SearchError::Transport(e.to_string()))?;
        match scripts.get_mut(query) {
            None => Ok(Vec::new()),
            Some(Script::Always(hits)) => Ok(hits.clone()),
            Some(Script::AlwaysFail(message)) => Err(SearchError::Transport(message.clone())),
            Some(Script::Sequence(queue)) => queue.pop_front().unwrap_or_else(|| Ok(Vec::new())),
        }
    }
}
