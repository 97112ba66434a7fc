//! Node middleware: compile_with_middleware and with_middleware().compile().

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use researchgraph::graph::NodeRunFn;
use researchgraph::{AgentError, NodeMiddleware, StateGraph, END, START};

use crate::common::{AddNode, Ledger, Posting};

/// Records node ids around each run.
#[derive(Default)]
struct Recorder {
    seen: Mutex<Vec<String>>,
}

#[async_trait]
impl NodeMiddleware<Ledger> for Recorder {
    async fn around_run(
        &self,
        node_id: &str,
        state: Ledger,
        inner: NodeRunFn<Ledger>,
    ) -> Result<Posting, AgentError> {
        self.seen.lock().unwrap().push(format!("before:{}", node_id));
        let out = inner(state).await;
        self.seen.lock().unwrap().push(format!("after:{}", node_id));
        out
    }
}

fn graph() -> StateGraph<Ledger> {
    let mut graph = StateGraph::<Ledger>::new();
    graph
        .add_node("a", Arc::new(AddNode::new("a", 1)))
        .add_node("b", Arc::new(AddNode::new("b", 1)))
        .add_edge(START, "a")
        .add_edge("a", "b")
        .add_edge("b", END);
    graph
}

#[tokio::test]
async fn compile_with_middleware_wraps_every_node() {
    let recorder = Arc::new(Recorder::default());
    let compiled = graph().compile_with_middleware(recorder.clone()).unwrap();
    let out = compiled.invoke(Ledger::default()).await.unwrap();
    assert_eq!(out.balance, 2);
    assert_eq!(
        *recorder.seen.lock().unwrap(),
        vec!["before:a", "after:a", "before:b", "after:b"]
    );
}

#[tokio::test]
async fn with_middleware_then_compile_uses_it() {
    let recorder = Arc::new(Recorder::default());
    let compiled = graph().with_middleware(recorder.clone()).compile().unwrap();
    compiled.invoke(Ledger::default()).await.unwrap();
    assert_eq!(recorder.seen.lock().unwrap().len(), 4);
}
