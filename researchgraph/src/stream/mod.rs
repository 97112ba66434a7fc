//! Streaming types for graph runs.
//!
//! Defines stream modes and events for per-node progress. Used by
//! `CompiledStateGraph::stream`.

use crate::state::GraphState;

/// Stream mode selector: which kinds of events to emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StreamMode {
    /// Emit the full merged state after each node completes.
    Values,
    /// Emit each node's partial update, tagged with the node id.
    Updates,
}

/// Streamed event emitted while running a graph.
#[derive(Clone, Debug)]
pub enum StreamEvent<S>
where
    S: GraphState,
{
    /// Full state snapshot after a node finishes.
    Values(S),
    /// The partial update a node returned, before it was merged.
    Updates { node_id: String, update: S::Update },
}

impl<S> StreamEvent<S>
where
    S: GraphState,
{
    /// Node id for `Updates`; `None` for `Values`.
    pub fn node_id(&self) -> Option<&str> {
        match self {
            Self::Updates { node_id, .. } => Some(node_id),
            Self::Values(_) => None,
        }
    }
}
