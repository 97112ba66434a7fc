//! # researchgraph
//!
//! A small LangGraph-style state-graph engine and the market research pipeline built
//! on it. A research query (plus optional PDF documents) flows through a planner, an
//! optional PDF agent, an optional web search agent and a writer, and comes out as a
//! structured financial report.
//!
//! ## Design Principles
//!
//! - **One state record per run**: every node reads `ResearchState` and returns a
//!   partial `StateUpdate`; the graph merges it with per-field reducers (overwrite,
//!   accumulate-by-key, append).
//! - **Static topology**: nodes, static edges and conditional edges are declared up
//!   front and validated by `compile()`. Routers may only pick from declared targets.
//! - **Collaborators behind traits**: `LlmClient`, `SearchClient` and
//!   `DocumentExtractor` are seams with mock implementations for tests.
//!
//! ## Main Modules
//!
//! - [`graph`]: `StateGraph`, `CompiledStateGraph`, `Node`, `NodeMiddleware`.
//! - [`state`]: `GraphState`, `ResearchState`, `StateUpdate`, reducers.
//! - [`stream`]: `StreamMode`, `StreamEvent` for per-node progress.
//! - [`research`]: planner, PDF agent, search agent, writer, routers, `ResearchRunner`.
//! - [`llm`], [`search`], [`pdf`]: collaborator traits, mocks and real backends.
//! - [`config`]: `ResearchConfig` from env / `.env`.
//!
//! ## Features
//!
//! - `pdf` (default): `LopdfExtractor` via `lopdf`.
//! - `openai`: `ChatOpenAI` via `async-openai`, and `ResearchRunner::from_config`
//!   (with `pdf`).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use researchgraph::{
//!     MockExtractor, MockLlm, MockSearch, ResearchCollaborators, ResearchRunner, RunnerOptions,
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let collaborators = ResearchCollaborators {
//!     planner_llm: Arc::new(MockLlm::with_response(r#"{"use_search_agent": true}"#)),
//!     writer_llm: Arc::new(MockLlm::with_response("# Report")),
//!     search: Arc::new(MockSearch::new()),
//!     extractor: Arc::new(MockExtractor::new()),
//! };
//! let runner = ResearchRunner::new(collaborators, RunnerOptions::default()).unwrap();
//! let state = runner.invoke("EV market outlook 2025", vec![]).await.unwrap();
//! println!("{}", state.report);
//! # }
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod llm;
pub mod message;
mod nullable;
pub mod pdf;
pub mod research;
pub mod retry;
pub mod search;
pub mod state;
pub mod stream;

pub use config::{ConfigError, ResearchConfig};
pub use error::AgentError;
pub use graph::{
    CompilationError, CompiledStateGraph, LoggingNodeMiddleware, Node, NodeMiddleware,
    StateGraph, END, START,
};
pub use llm::{LlmClient, LlmResponse, MockLlm};
pub use message::Message;
pub use pdf::{DocumentExtractor, Extraction, ExtractionError, ExtractionMetadata, MockExtractor};
pub use research::{
    build_initial_state, build_research_graph, ResearchCollaborators, ResearchRunner, Route,
    RunError, RunnerOptions,
};
pub use retry::RetryPolicy;
pub use search::{
    MockSearch, SearchClient, SearchDepth, SearchError, SearchHit, SearchOptions, TavilySearch,
};
pub use state::{GraphState, Plan, ResearchState, SearchResult, StateUpdate, UploadedFile};
pub use stream::{StreamEvent, StreamMode};

#[cfg(feature = "openai")]
pub use llm::ChatOpenAI;

#[cfg(feature = "pdf")]
pub use pdf::LopdfExtractor;
