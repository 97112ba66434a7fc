//! Node middleware: wraps every node run inside `CompiledStateGraph`.

use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::time::Instant;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::state::GraphState;

/// Boxed future returned by the wrapped node run.
pub type NodeRunFuture<U> = Pin<Box<dyn Future<Output = Result<U, AgentError>> + Send>>;

/// The wrapped node run: takes the state snapshot, yields the node's partial update.
pub type NodeRunFn<S> = Box<dyn FnOnce(S) -> NodeRunFuture<<S as GraphState>::Update> + Send>;

/// Around-advice for node execution.
///
/// Implementations must call `inner(state)` exactly once and return its result
/// (possibly after logging or timing it).
///
/// **Interaction**: Set via `StateGraph::with_middleware` or `compile_with_middleware`.
#[async_trait]
pub trait NodeMiddleware<S>: Send + Sync
where
    S: GraphState,
{
    async fn around_run(
        &self,
        node_id: &str,
        state: S,
        inner: NodeRunFn<S>,
    ) -> Result<S::Update, AgentError>;
}

/// Middleware that logs node enter/exit (with elapsed time) through `tracing`.
pub struct LoggingNodeMiddleware<S> {
    _state: PhantomData<fn() -> S>,
}

impl<S> Default for LoggingNodeMiddleware<S> {
    fn default() -> Self {
        Self {
            _state: PhantomData,
        }
    }
}

#[async_trait]
impl<S> NodeMiddleware<S> for LoggingNodeMiddleware<S>
where
    S: GraphState,
{
    async fn around_run(
        &self,
        node_id: &str,
        state: S,
        inner: NodeRunFn<S>,
    ) -> Result<S::Update, AgentError> {
        tracing::info!(node = node_id, "enter node");
        let started = Instant::now();
        let result = inner(state).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => tracing::info!(node = node_id, elapsed_ms, "exit node"),
            Err(e) => tracing::error!(node = node_id, elapsed_ms, error = %e, "node failed"),
        }
        result
    }
}
