//! Graph compilation error.
//!
//! Returned by `StateGraph::compile` when the node/edge table is inconsistent.
//! All topology defects are reported here, before any node runs.

use thiserror::Error;

/// Error when compiling a state graph (e.g. edge references unknown node, undeclared route target).
#[derive(Debug, Error)]
pub enum CompilationError {
    /// A node id in an edge was not registered via `add_node` (and is not START/END).
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// A conditional edge lists a target that is neither a registered node nor END.
    #[error("conditional edge target is not a declared node: {0}")]
    InvalidConditionalTarget(String),

    /// A conditional edge was added with no targets at all.
    #[error("conditional edges from '{0}' declare no targets")]
    EmptyConditionalTargets(String),

    /// A node has both an outgoing `add_edge` and `add_conditional_edges`.
    #[error("node '{0}' has both a static edge and conditional edges")]
    NodeHasBothEdgeAndConditional(String),

    /// A registered node has no outgoing edge, so a run reaching it could not continue.
    #[error("node '{0}' has no outgoing edge")]
    MissingOutgoing(String),

    /// No edge has from_id == START.
    #[error("graph must have exactly one edge from START")]
    MissingStart,

    /// END cannot be reached from START.
    #[error("END is not reachable from START")]
    MissingEnd,

    /// Edge table is malformed (e.g. several edges from START, a node with two static edges).
    #[error("invalid edges: {0}")]
    InvalidChain(String),
}
