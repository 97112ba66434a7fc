//! StateGraph stream: per-node events, snapshots, error item.

use std::collections::HashSet;
use std::sync::Arc;

use researchgraph::{CompiledStateGraph, StateGraph, StreamEvent, StreamMode, END, START};
use tokio_stream::StreamExt;

use crate::common::{AddNode, FailNode, Ledger};

fn two_step() -> CompiledStateGraph<Ledger> {
    let mut graph = StateGraph::<Ledger>::new();
    graph
        .add_node("a", Arc::new(AddNode::new("a", 2)))
        .add_node("b", Arc::new(AddNode::new("b", 3)))
        .add_edge(START, "a")
        .add_edge("a", "b")
        .add_edge("b", END);
    graph.compile().unwrap()
}

/// **Scenario**: Updates mode yields exactly one event per visited node, in order.
#[tokio::test]
async fn stream_updates_one_event_per_node() {
    let events: Vec<_> = two_step()
        .stream(Ledger::default(), HashSet::from([StreamMode::Updates]))
        .collect()
        .await;
    let ids: Vec<String> = events
        .iter()
        .map(|e| e.as_ref().unwrap().node_id().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["a", "b"]);
    match events[1].as_ref().unwrap() {
        StreamEvent::Updates { update, .. } => assert_eq!(update.amount, 3),
        other => panic!("expected Updates, got {:?}", other),
    }
}

/// **Scenario**: Values mode snapshots the merged state after each node.
#[tokio::test]
async fn stream_values_snapshots_after_each_node() {
    let balances: Vec<i64> = two_step()
        .stream(Ledger::default(), HashSet::from([StreamMode::Values]))
        .filter_map(|e| match e {
            Ok(StreamEvent::Values(s)) => Some(s.balance),
            _ => None,
        })
        .collect()
        .await;
    assert_eq!(balances, vec![2, 5]);
}

/// **Scenario**: a failing node ends the stream with a single Err item.
#[tokio::test]
async fn stream_failure_yields_err_and_ends() {
    let mut graph = StateGraph::<Ledger>::new();
    graph
        .add_node("a", Arc::new(AddNode::new("a", 1)))
        .add_node("fail", Arc::new(FailNode))
        .add_edge(START, "a")
        .add_edge("a", "fail")
        .add_edge("fail", END);
    let events: Vec<_> = graph
        .compile()
        .unwrap()
        .stream(Ledger::default(), HashSet::from([StreamMode::Updates]))
        .collect()
        .await;
    assert_eq!(events.len(), 2);
    assert!(events[0].is_ok());
    assert!(events[1].is_err());
}
