//! State record for the research pipeline and its partial-update type.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::message::Message;
use crate::nullable::null_as_default;
use crate::search::SearchHit;

use super::{reducer, GraphState};

/// A document supplied by the caller.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

impl fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("name", &self.name)
            .field("bytes", &format_args!("<{} bytes>", self.bytes.len()))
            .finish()
    }
}

/// Execution plan produced by the planner node.
///
/// Every field defaults, so a model response carrying only some keys, or `null`
/// for some of them, still parses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Plan {
    #[serde(deserialize_with = "null_as_default")]
    pub goal: String,
    #[serde(deserialize_with = "null_as_default")]
    pub use_pdf_agent: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub pdf_instructions: String,
    #[serde(deserialize_with = "null_as_default")]
    pub use_search_agent: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub search_queries: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub writer_instructions: String,
}

/// One web search result, tagged with the query that produced it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub content: String,
    pub score: f64,
    pub query: String,
}

impl SearchResult {
    pub fn from_hit(hit: SearchHit, query: &str) -> Self {
        Self {
            title: hit.title,
            url: hit.url,
            content: hit.content,
            score: hit.score,
            query: query.to_string(),
        }
    }
}

/// Shared state of one research run.
///
/// Created once per query by the caller, threaded through planner → (pdf_agent) →
/// (search_agent) → writer, then discarded.
#[derive(Clone, Debug, Default)]
pub struct ResearchState {
    pub query: String,
    pub uploaded_files: Vec<UploadedFile>,
    pub plan: Plan,
    pub pdf_content: String,
    pub search_results: Vec<SearchResult>,
    pub report: String,
    /// Node name → human-readable status. Accumulated across nodes.
    pub status: BTreeMap<String, String>,
    /// Chat history. Appended, never replaced.
    pub messages: Vec<Message>,
}

/// Partial update returned by a research node: only the keys that node writes.
#[derive(Clone, Debug, Default)]
pub struct StateUpdate {
    pub query: Option<String>,
    pub uploaded_files: Option<Vec<UploadedFile>>,
    pub plan: Option<Plan>,
    pub pdf_content: Option<String>,
    pub search_results: Option<Vec<SearchResult>>,
    pub report: Option<String>,
    pub status: BTreeMap<String, String>,
    pub messages: Vec<Message>,
}

impl StateUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `status[node] = text`.
    pub fn with_status(mut self, node: &str, text: impl Into<String>) -> Self {
        self.status.insert(node.to_string(), text.into());
        self
    }

    pub fn with_plan(mut self, plan: Plan) -> Self {
        self.plan = Some(plan);
        self
    }

    pub fn with_pdf_content(mut self, content: impl Into<String>) -> Self {
        self.pdf_content = Some(content.into());
        self
    }

    pub fn with_search_results(mut self, results: Vec<SearchResult>) -> Self {
        self.search_results = Some(results);
        self
    }

    pub fn with_report(mut self, report: impl Into<String>) -> Self {
        self.report = Some(report.into());
        self
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }
}

impl GraphState for ResearchState {
    type Update = StateUpdate;

    fn apply(&mut self, update: StateUpdate) {
        reducer::overwrite(&mut self.query, update.query);
        reducer::overwrite(&mut self.uploaded_files, update.uploaded_files);
        reducer::overwrite(&mut self.plan, update.plan);
        reducer::overwrite(&mut self.pdf_content, update.pdf_content);
        reducer::overwrite(&mut self.search_results, update.search_results);
        reducer::overwrite(&mut self.report, update.report);
        reducer::merge_entries(&mut self.status, update.status);
        reducer::append(&mut self.messages, update.messages);
    }
}
