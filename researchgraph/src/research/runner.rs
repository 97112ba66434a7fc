//! Research graph runner: encapsulates graph build, initial state, invoke and stream.
//!
//! Used by researchgraph-cli and other callers that need to run the pipeline without
//! wiring planner → pdf_agent / search_agent → writer by hand.

use std::collections::HashSet;
use std::sync::Arc;

use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;

use crate::error::AgentError;
use crate::graph::{
    CompilationError, CompiledStateGraph, LoggingNodeMiddleware, StateGraph, END, START,
};
use crate::llm::LlmClient;
use crate::message::Message;
use crate::pdf::DocumentExtractor;
use crate::retry::RetryPolicy;
use crate::search::{SearchClient, SearchOptions};
use crate::state::{ResearchState, UploadedFile};
use crate::stream::{StreamEvent, StreamMode};

use super::{
    route_after_extract, route_after_plan, PdfAgentNode, PlannerNode, SearchAgentNode,
    WriterNode, PDF_AGENT, PLANNER, SEARCH_AGENT, WRITER,
};

/// External collaborators the pipeline nodes call.
#[derive(Clone)]
pub struct ResearchCollaborators {
    pub planner_llm: Arc<dyn LlmClient>,
    pub writer_llm: Arc<dyn LlmClient>,
    pub search: Arc<dyn SearchClient>,
    pub extractor: Arc<dyn DocumentExtractor>,
}

/// Tunables for the pipeline nodes and the graph.
#[derive(Clone, Debug)]
pub struct RunnerOptions {
    pub search_options: SearchOptions,
    pub retry_policy: RetryPolicy,
    pub max_search_queries: usize,
    /// When true, attaches `LoggingNodeMiddleware` (node enter/exit with timing).
    pub verbose: bool,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            search_options: SearchOptions::default(),
            retry_policy: RetryPolicy::default(),
            max_search_queries: 5,
            verbose: false,
        }
    }
}

/// Error type for ResearchRunner invoke/stream operations.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("compilation failed: {0}")]
    Compilation(#[from] CompilationError),
    #[error("execution failed: {0}")]
    Execution(#[from] AgentError),
    #[error("stream ended without final state")]
    StreamEndedWithoutState,
}

/// Builds and compiles the research graph.
///
/// # Errors
///
/// Returns `CompilationError` if the topology fails validation.
pub fn build_research_graph(
    collaborators: ResearchCollaborators,
    options: &RunnerOptions,
) -> Result<CompiledStateGraph<ResearchState>, CompilationError> {
    let planner = PlannerNode::new(collaborators.planner_llm)
        .with_max_search_queries(options.max_search_queries);
    let pdf_agent = PdfAgentNode::new(collaborators.extractor);
    let search_agent = SearchAgentNode::new(collaborators.search)
        .with_options(options.search_options.clone())
        .with_retry_policy(options.retry_policy.clone());
    let writer = WriterNode::new(collaborators.writer_llm);

    let mut graph = StateGraph::<ResearchState>::new();
    graph
        .add_node(PLANNER, Arc::new(planner))
        .add_node(PDF_AGENT, Arc::new(pdf_agent))
        .add_node(SEARCH_AGENT, Arc::new(search_agent))
        .add_node(WRITER, Arc::new(writer))
        .add_edge(START, PLANNER)
        .add_conditional_edges(
            PLANNER,
            [PDF_AGENT, SEARCH_AGENT, WRITER],
            route_after_plan,
        )
        .add_conditional_edges(PDF_AGENT, [SEARCH_AGENT, WRITER], route_after_extract)
        .add_edge(SEARCH_AGENT, WRITER)
        .add_edge(WRITER, END);

    if options.verbose {
        graph.compile_with_middleware(Arc::new(LoggingNodeMiddleware::<ResearchState>::default()))
    } else {
        graph.compile()
    }
}

/// Fresh state for one run: the query, the documents, and the user turn in `messages`.
pub fn build_initial_state(query: &str, files: Vec<UploadedFile>) -> ResearchState {
    ResearchState {
        query: query.to_string(),
        uploaded_files: files,
        messages: vec![Message::user(query)],
        ..Default::default()
    }
}

/// Research graph runner: owns the compiled graph; one fresh state per call.
///
/// # Example
///
/// ```ignore
/// let runner = ResearchRunner::new(collaborators, RunnerOptions::default())?;
/// let state = runner.invoke("EV market outlook 2025", vec![]).await?;
/// println!("{}", state.report);
/// ```
pub struct ResearchRunner {
    compiled: CompiledStateGraph<ResearchState>,
}

impl ResearchRunner {
    pub fn new(
        collaborators: ResearchCollaborators,
        options: RunnerOptions,
    ) -> Result<Self, CompilationError> {
        let compiled = build_research_graph(collaborators, &options)?;
        Ok(Self { compiled })
    }

    /// Runner with OpenAI planner/writer, Tavily search and the lopdf extractor,
    /// all configured from `config`.
    #[cfg(all(feature = "openai", feature = "pdf"))]
    pub fn from_config(
        config: &crate::config::ResearchConfig,
        verbose: bool,
    ) -> Result<Self, CompilationError> {
        use crate::llm::ChatOpenAI;
        use crate::pdf::LopdfExtractor;
        use crate::search::TavilySearch;

        let api_key = config.openai_api_key.as_deref();
        let planner_llm = ChatOpenAI::new(api_key, &config.openai_api_base, &config.model)
            .with_temperature(config.temperature);
        let writer_llm = ChatOpenAI::new(api_key, &config.openai_api_base, &config.model)
            .with_temperature(config.temperature)
            .with_max_tokens(config.writer_max_tokens);

        let collaborators = ResearchCollaborators {
            planner_llm: Arc::new(planner_llm),
            writer_llm: Arc::new(writer_llm),
            search: Arc::new(TavilySearch::new(config.tavily_api_key.clone())),
            extractor: Arc::new(LopdfExtractor::new(
                config.pdf_max_pages,
                config.pdf_table_extraction,
            )),
        };
        let options = RunnerOptions {
            search_options: config.search_options(),
            max_search_queries: config.planner_max_queries,
            verbose,
            ..Default::default()
        };
        Self::new(collaborators, options)
    }

    /// The compiled graph, for callers that drive `invoke` / `stream` themselves.
    pub fn graph(&self) -> &CompiledStateGraph<ResearchState> {
        &self.compiled
    }

    /// Runs the pipeline to completion and returns the final state.
    pub async fn invoke(
        &self,
        query: &str,
        files: Vec<UploadedFile>,
    ) -> Result<ResearchState, RunError> {
        let state = build_initial_state(query, files);
        Ok(self.compiled.invoke(state).await?)
    }

    /// Streams per-node updates followed by the merged state after each node.
    pub fn stream(
        &self,
        query: &str,
        files: Vec<UploadedFile>,
    ) -> ReceiverStream<Result<StreamEvent<ResearchState>, AgentError>> {
        let state = build_initial_state(query, files);
        let modes = HashSet::from([StreamMode::Updates, StreamMode::Values]);
        self.compiled.stream(state, modes)
    }

    /// Streams the run, passing each event to `on_event`; returns the final state from
    /// the last `StreamEvent::Values`.
    ///
    /// A node failure ends the stream and is returned as `RunError::Execution`.
    pub async fn stream_with_callback<F>(
        &self,
        query: &str,
        files: Vec<UploadedFile>,
        mut on_event: F,
    ) -> Result<ResearchState, RunError>
    where
        F: FnMut(&StreamEvent<ResearchState>),
    {
        let mut stream = self.stream(query, files);
        let mut final_state: Option<ResearchState> = None;
        while let Some(item) = stream.next().await {
            let event = item?;
            on_event(&event);
            if let StreamEvent::Values(s) = event {
                final_state = Some(s);
            }
        }
        final_state.ok_or(RunError::StreamEndedWithoutState)
    }
}
