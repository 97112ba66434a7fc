//! State graph: nodes, static and conditional edges, compile and run.
//!
//! Build a `StateGraph`, `compile` it once (all topology checks happen here), then
//! `invoke` or `stream` it with a fresh initial state per run.

mod compile_error;
mod compiled;
mod conditional;
pub mod logging;
mod node;
mod node_middleware;
mod state_graph;

pub use compile_error::CompilationError;
pub use compiled::CompiledStateGraph;
pub use conditional::{ConditionalRouter, ConditionalRouterFn};
pub use node::Node;
pub use node_middleware::{LoggingNodeMiddleware, NodeMiddleware, NodeRunFn, NodeRunFuture};
pub use state_graph::{StateGraph, DEFAULT_RECURSION_LIMIT, END, START};
