//! Compiled state graph: immutable, supports invoke and stream.
//!
//! Built by `StateGraph::compile`. Holds the node table, the outgoing entry of every
//! node (static edge or conditional router) and optional middleware.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::error::AgentError;
use crate::state::GraphState;
use crate::stream::{StreamEvent, StreamMode};

use super::conditional::NextEntry;
use super::logging::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
    log_state_update,
};
use super::node_middleware::NodeMiddleware;
use super::{Node, END};

type EventSender<S> = mpsc::Sender<Result<StreamEvent<S>, AgentError>>;

/// Compiled graph: immutable structure, supports invoke and stream.
///
/// Runs from the entry node; after each node merges the node's partial update into
/// the running state, then follows the node's static edge or asks its conditional
/// router (with the merged state) for the next node, until `END`.
pub struct CompiledStateGraph<S>
where
    S: GraphState,
{
    pub(super) nodes: HashMap<String, Arc<dyn Node<S>>>,
    pub(super) first_node_id: String,
    pub(super) next_map: HashMap<String, NextEntry<S>>,
    /// Optional node middleware; set when built with `with_middleware` or `compile_with_middleware`.
    pub(super) middleware: Option<Arc<dyn NodeMiddleware<S>>>,
    pub(super) recursion_limit: usize,
}

impl<S> Clone for CompiledStateGraph<S>
where
    S: GraphState,
{
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            first_node_id: self.first_node_id.clone(),
            next_map: self.next_map.clone(),
            middleware: self.middleware.clone(),
            recursion_limit: self.recursion_limit,
        }
    }
}

/// Where to send stream events, and which kinds.
struct StreamSink<'a, S>
where
    S: GraphState,
{
    tx: &'a EventSender<S>,
    modes: &'a HashSet<StreamMode>,
}

impl<S> CompiledStateGraph<S>
where
    S: GraphState,
{
    /// Id of the entry node (target of the `START` edge).
    pub fn entry(&self) -> &str {
        &self.first_node_id
    }

    /// Shared run loop used by invoke() and stream(): steps through nodes until END.
    ///
    /// Returns the number of nodes visited. When the stream consumer has gone away the
    /// loop stops early.
    async fn run_loop_inner(
        &self,
        state: &mut S,
        sink: Option<StreamSink<'_, S>>,
    ) -> Result<usize, AgentError> {
        let mut current_id = self.first_node_id.clone();
        let mut steps = 0usize;
        loop {
            if steps >= self.recursion_limit {
                return Err(AgentError::RecursionLimit(self.recursion_limit));
            }
            steps += 1;

            let node = self
                .nodes
                .get(&current_id)
                .cloned()
                .ok_or_else(|| AgentError::ExecutionFailed(format!("node not found: {}", current_id)))?;

            log_node_start(&current_id);
            let update = if let Some(middleware) = &self.middleware {
                middleware
                    .around_run(
                        &current_id,
                        state.clone(),
                        Box::new(move |s| Box::pin(async move { node.run(&s).await })),
                    )
                    .await?
            } else {
                node.run(&*state).await?
            };

            let streamed_update = sink
                .as_ref()
                .filter(|s| s.modes.contains(&StreamMode::Updates))
                .map(|_| update.clone());
            state.apply(update);
            log_state_update(&current_id);

            if let Some(sink) = &sink {
                if let Some(update) = streamed_update {
                    let event = StreamEvent::Updates {
                        node_id: current_id.clone(),
                        update,
                    };
                    if sink.tx.send(Ok(event)).await.is_err() {
                        tracing::debug!(node_id = %current_id, "stream receiver dropped, stopping run");
                        return Ok(steps);
                    }
                }
                if sink.modes.contains(&StreamMode::Values)
                    && sink.tx.send(Ok(StreamEvent::Values(state.clone()))).await.is_err()
                {
                    tracing::debug!(node_id = %current_id, "stream receiver dropped, stopping run");
                    return Ok(steps);
                }
            }

            let next = self.resolve_next(&current_id, state)?;
            log_node_complete(&current_id, &next);
            if next == END {
                return Ok(steps);
            }
            current_id = next;
        }
    }

    fn resolve_next(&self, current_id: &str, state: &S) -> Result<String, AgentError> {
        match self.next_map.get(current_id) {
            Some(NextEntry::Unconditional(to)) => Ok(to.clone()),
            Some(NextEntry::Conditional(router)) => router.resolve(current_id, state),
            None => Err(AgentError::ExecutionFailed(format!(
                "node '{}' has no outgoing edge",
                current_id
            ))),
        }
    }

    /// Runs the graph to completion and returns the final merged state.
    ///
    /// Node errors are not caught: the first failing node aborts the run and its
    /// error is returned.
    pub async fn invoke(&self, state: S) -> Result<S, AgentError> {
        let mut state = state;
        log_graph_start(&self.first_node_id);
        match self.run_loop_inner(&mut state, None).await {
            Ok(steps) => {
                log_graph_complete(steps);
                Ok(state)
            }
            Err(e) => {
                log_graph_error(&e);
                Err(e)
            }
        }
    }

    /// Streams graph execution, emitting events via channel-backed Stream.
    ///
    /// With `StreamMode::Updates` the stream yields one `Updates { node_id, update }`
    /// per node visited; `StreamMode::Values` adds the merged state after each node.
    /// A failing node yields a single `Err` and the stream ends. The stream is
    /// single-use; call `stream` again with a fresh initial state for another run.
    pub fn stream(
        &self,
        state: S,
        stream_mode: impl Into<HashSet<StreamMode>>,
    ) -> ReceiverStream<Result<StreamEvent<S>, AgentError>> {
        let (tx, rx) = mpsc::channel(128);
        let graph = self.clone();
        let modes: HashSet<StreamMode> = stream_mode.into();

        tokio::spawn(async move {
            let mut state = state;
            log_graph_start(&graph.first_node_id);
            let sink = StreamSink {
                tx: &tx,
                modes: &modes,
            };
            match graph.run_loop_inner(&mut state, Some(sink)).await {
                Ok(steps) => log_graph_complete(steps),
                Err(e) => {
                    log_graph_error(&e);
                    let _ = tx.send(Err(e)).await;
                }
            }
        });

        ReceiverStream::new(rx)
    }
}
