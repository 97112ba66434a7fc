//! Logging utilities for graph execution.
//!
//! Structured `tracing` events for graph start/end, node execution and routing.

/// Log node execution start.
pub fn log_node_start(node_id: &str) {
    tracing::debug!(node_id = node_id, "Starting node execution");
}

/// Log node completion together with the routing decision.
pub fn log_node_complete(node_id: &str, next: &str) {
    tracing::debug!(node_id = node_id, next = next, "Node execution complete");
}

/// Log that a node's partial update was merged into the running state.
pub fn log_state_update(node_id: &str) {
    tracing::debug!(node_id = node_id, "State updated");
}

/// Log graph execution start.
pub fn log_graph_start(entry: &str) {
    tracing::info!(entry = entry, "Starting graph execution");
}

/// Log graph execution completion.
pub fn log_graph_complete(steps: usize) {
    tracing::info!(steps = steps, "Graph execution complete");
}

/// Log graph execution error.
pub fn log_graph_error(error: &crate::error::AgentError) {
    tracing::error!(error = %error, "Graph execution error");
}
