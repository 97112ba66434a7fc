//! One human-readable line per finished node.

use researchgraph::research::{PDF_AGENT, PLANNER, SEARCH_AGENT, WRITER};
use researchgraph::{ResearchState, StreamEvent};

fn badge(node_id: &str) -> &'static str {
    match node_id {
        PLANNER => "🧠",
        PDF_AGENT => "📄",
        SEARCH_AGENT => "🔍",
        WRITER => "✍️",
        _ => "🔧",
    }
}

/// `"<badge> <node>: <status>"` for an `Updates` event; `None` for snapshots.
///
/// The status text is the one the node itself wrote; a node that wrote none is
/// reported as `done`.
pub fn progress_line(event: &StreamEvent<ResearchState>) -> Option<String> {
    match event {
        StreamEvent::Updates { node_id, update } => {
            let status = update
                .status
                .get(node_id.as_str())
                .map(String::as_str)
                .unwrap_or("done");
            Some(format!("{} {}: {}", badge(node_id), node_id, status))
        }
        StreamEvent::Values(_) => None,
    }
}
