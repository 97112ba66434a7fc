//! Agent execution error types.
//!
//! Returned by `Node::run` and by `CompiledStateGraph::invoke` / `stream` when a run
//! fails. A run that returns one of these produced no report.

use thiserror::Error;

/// Agent execution error.
///
/// Every variant is fatal for the run it occurs in: the graph does not catch node
/// errors, so the caller gets this instead of a partially filled state.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Execution failed with a message (e.g. LLM call failed, empty model output).
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// A collaborator was used without its credential configured (e.g. `OPENAI_API_KEY`).
    #[error("missing credential: {0} is not set")]
    MissingCredential(&'static str),

    /// A conditional router returned a target that was not declared for its source node.
    #[error("router for node '{node}' returned undeclared target '{target}'")]
    InvalidRoute { node: String, target: String },

    /// The run visited more nodes than the graph's recursion limit allows.
    #[error("recursion limit of {0} steps reached without hitting END")]
    RecursionLimit(usize),
}
