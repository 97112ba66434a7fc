//! StateGraph invoke: linear chains, conditional routing, failures.

use std::sync::Arc;

use researchgraph::{AgentError, StateGraph, END, START};

use crate::common::{AddNode, FailNode, Ledger};

#[tokio::test]
async fn invoke_linear_chain_merges_every_update() {
    let mut graph = StateGraph::<Ledger>::new();
    graph
        .add_node("deposit", Arc::new(AddNode::new("deposit", 100)))
        .add_node("fee", Arc::new(AddNode::new("fee", -3)))
        .add_edge(START, "deposit")
        .add_edge("deposit", "fee")
        .add_edge("fee", END);
    let compiled = graph.compile().unwrap();

    let out = compiled.invoke(Ledger::default()).await.unwrap();
    assert_eq!(out.balance, 97);
    assert_eq!(out.log, vec!["deposit", "fee"]);
}

/// **Scenario**: the router sees the merged state of the node it follows.
#[tokio::test]
async fn invoke_routes_on_merged_state() {
    let build = |opening: i64| {
        let mut graph = StateGraph::<Ledger>::new();
        graph
            .add_node("open", Arc::new(AddNode::new("open", opening)))
            .add_node("overdraft", Arc::new(AddNode::new("overdraft", -25)))
            .add_node("bonus", Arc::new(AddNode::new("bonus", 10)))
            .add_edge(START, "open")
            .add_conditional_edges("open", ["overdraft", "bonus"], |s: &Ledger| {
                if s.balance < 0 {
                    "overdraft"
                } else {
                    "bonus"
                }
            })
            .add_edge("overdraft", END)
            .add_edge("bonus", END);
        graph.compile().unwrap()
    };

    let negative = build(-5).invoke(Ledger::default()).await.unwrap();
    assert_eq!(negative.log, vec!["open", "overdraft"]);
    let positive = build(5).invoke(Ledger::default()).await.unwrap();
    assert_eq!(positive.log, vec!["open", "bonus"]);
    assert_eq!(positive.balance, 15);
}

/// **Scenario**: a router returning a name outside its declared set fails the run.
#[tokio::test]
async fn invoke_rejects_undeclared_route() {
    let mut graph = StateGraph::<Ledger>::new();
    graph
        .add_node("a", Arc::new(AddNode::new("a", 1)))
        .add_node("b", Arc::new(AddNode::new("b", 1)))
        .add_edge(START, "a")
        .add_conditional_edges("a", ["b"], |_: &Ledger| "somewhere_else")
        .add_edge("b", END);
    let err = graph.compile().unwrap().invoke(Ledger::default()).await.unwrap_err();
    match err {
        AgentError::InvalidRoute { node, target } => {
            assert_eq!(node, "a");
            assert_eq!(target, "somewhere_else");
        }
        other => panic!("expected InvalidRoute, got {}", other),
    }
}

#[tokio::test]
async fn invoke_propagates_node_error() {
    let mut graph = StateGraph::<Ledger>::new();
    graph
        .add_node("a", Arc::new(AddNode::new("a", 1)))
        .add_node("fail", Arc::new(FailNode))
        .add_edge(START, "a")
        .add_edge("a", "fail")
        .add_edge("fail", END);
    let err = graph.compile().unwrap().invoke(Ledger::default()).await.unwrap_err();
    assert!(err.to_string().contains("ledger closed"));
}

/// **Scenario**: a router loop is cut off by the recursion limit.
#[tokio::test]
async fn invoke_stops_at_recursion_limit() {
    let mut graph = StateGraph::<Ledger>::new();
    graph
        .add_node("tick", Arc::new(AddNode::new("tick", 1)))
        .add_edge(START, "tick")
        .add_conditional_edges("tick", ["tick", END], |s: &Ledger| {
            if s.balance > 1_000 {
                END
            } else {
                "tick"
            }
        });
    let compiled = graph.with_recursion_limit(5).compile().unwrap();
    let err = compiled.invoke(Ledger::default()).await.unwrap_err();
    assert!(matches!(err, AgentError::RecursionLimit(5)));
}
