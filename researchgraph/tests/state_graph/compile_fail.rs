//! StateGraph compile failure cases: unknown node, undeclared targets, no way to END.

use std::sync::Arc;

use researchgraph::{CompilationError, StateGraph, END, START};

use crate::common::{AddNode, Ledger};

#[test]
fn compile_fails_when_edge_refers_to_unknown_node() {
    let mut graph = StateGraph::<Ledger>::new();
    graph.add_node("a", Arc::new(AddNode::new("a", 1)));
    graph.add_edge(START, "a");
    graph.add_edge("a", "missing");

    match graph.compile() {
        Err(CompilationError::NodeNotFound(id)) => assert_eq!(id, "missing"),
        other => panic!("expected NodeNotFound, got {:?}", other.err()),
    }
}

/// **Scenario**: a conditional target must be a registered node or END.
#[test]
fn compile_fails_when_conditional_target_is_undeclared() {
    let mut graph = StateGraph::<Ledger>::new();
    graph
        .add_node("a", Arc::new(AddNode::new("a", 1)))
        .add_edge(START, "a")
        .add_conditional_edges("a", ["ghost", END], |_: &Ledger| END);

    match graph.compile() {
        Err(CompilationError::InvalidConditionalTarget(t)) => assert_eq!(t, "ghost"),
        other => panic!("expected InvalidConditionalTarget, got {:?}", other.err()),
    }
}

#[test]
fn compile_fails_without_start_edge() {
    let mut graph = StateGraph::<Ledger>::new();
    graph
        .add_node("a", Arc::new(AddNode::new("a", 1)))
        .add_edge("a", END);
    assert!(matches!(graph.compile(), Err(CompilationError::MissingStart)));
}

/// **Scenario**: a cycle with no exit can never reach END.
#[test]
fn compile_fails_when_end_unreachable() {
    let mut graph = StateGraph::<Ledger>::new();
    graph
        .add_node("a", Arc::new(AddNode::new("a", 1)))
        .add_node("b", Arc::new(AddNode::new("b", 1)))
        .add_edge(START, "a")
        .add_edge("a", "b")
        .add_edge("b", "a");
    assert!(matches!(graph.compile(), Err(CompilationError::MissingEnd)));
}

#[test]
fn compile_fails_when_node_has_edge_and_router() {
    let mut graph = StateGraph::<Ledger>::new();
    graph
        .add_node("a", Arc::new(AddNode::new("a", 1)))
        .add_edge(START, "a")
        .add_edge("a", END)
        .add_conditional_edges("a", [END], |_: &Ledger| END);
    match graph.compile() {
        Err(CompilationError::NodeHasBothEdgeAndConditional(id)) => assert_eq!(id, "a"),
        other => panic!("expected NodeHasBothEdgeAndConditional, got {:?}", other.err()),
    }
}

#[test]
fn compile_fails_when_node_has_no_outgoing_edge() {
    let mut graph = StateGraph::<Ledger>::new();
    graph
        .add_node("a", Arc::new(AddNode::new("a", 1)))
        .add_node("orphan", Arc::new(AddNode::new("orphan", 1)))
        .add_edge(START, "a")
        .add_edge("a", END);
    match graph.compile() {
        Err(CompilationError::MissingOutgoing(id)) => assert_eq!(id, "orphan"),
        other => panic!("expected MissingOutgoing, got {:?}", other.err()),
    }
}
