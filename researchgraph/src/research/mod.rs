//! Market research pipeline: planner, PDF agent, search agent, writer.
//!
//! Topology (fixed, validated at compile):
//!
//! ```text
//! START → planner ─┬─→ pdf_agent ─┬─→ search_agent → writer → END
//!                  ├─→ search_agent   │
//!                  └─→ writer  ←──────┘
//! ```
//!
//! Each node reads `ResearchState` and returns a `StateUpdate`; the routers in
//! [`routing`] pick the branch from the plan the planner wrote.

mod extractor;
mod planner;
pub mod routing;
mod runner;
mod searcher;
mod writer;

pub use extractor::PdfAgentNode;
pub use planner::{parse_plan, planner_user_message, PlanParse, PlannerNode, PLANNER_SYSTEM_PROMPT};
pub use routing::{route_after_extract, route_after_plan, Route};
pub use runner::{
    build_initial_state, build_research_graph, ResearchCollaborators, ResearchRunner,
    RunError, RunnerOptions,
};
pub use searcher::{dedup_by_url, SearchAgentNode};
pub use writer::{
    build_writer_context, WriterNode, MAX_CONTEXT_SEARCH_RESULTS, PDF_CONTEXT_CHAR_LIMIT,
    WRITER_SYSTEM_PROMPT,
};

/// Node id of the planner; also its `status` key.
pub const PLANNER: &str = "planner";
/// Node id of the PDF agent.
pub const PDF_AGENT: &str = "pdf_agent";
/// Node id of the search agent.
pub const SEARCH_AGENT: &str = "search_agent";
/// Node id of the writer.
pub const WRITER: &str = "writer";
