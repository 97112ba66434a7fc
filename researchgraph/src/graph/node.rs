//! Graph node trait: one step in a StateGraph.
//!
//! Receives a snapshot of state `S` and returns a partial update `S::Update`.
//! The graph merges the update and picks the next node; nodes do not route.

use async_trait::async_trait;

use crate::error::AgentError;
use crate::state::GraphState;

/// One step in a graph: state snapshot in, partial update out.
///
/// The node only reads `state`; it never mutates it. The returned update holds just
/// the keys this node owns, and `CompiledStateGraph` merges it with
/// `GraphState::apply`.
///
/// **Interaction**: Registered via `StateGraph::add_node`; driven by
/// `CompiledStateGraph::invoke` and `stream`.
#[async_trait]
pub trait Node<S>: Send + Sync
where
    S: GraphState,
{
    /// Node id (e.g. `"planner"`, `"writer"`). Must be unique within a graph.
    fn id(&self) -> &str;

    /// One step. An `Err` aborts the whole run.
    async fn run(&self, state: &S) -> Result<S::Update, AgentError>;
}
