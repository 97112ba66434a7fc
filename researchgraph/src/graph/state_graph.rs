//! State graph: nodes + explicit edges (from → to) and conditional edges.
//!
//! Add nodes with `add_node`, wire them with `add_edge(from, to)` using `START` and
//! `END` for entry/exit, and use `add_conditional_edges` where the next node depends
//! on state. Then `compile` to get a `CompiledStateGraph`.
//!
//! # Conditional edges
//!
//! After the source node's update has been merged, the router is called with the
//! merged state. Its answer must be one of the targets declared with it; targets are
//! checked against the node table at compile time. A node has either one outgoing
//! `add_edge` or conditional edges, not both.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use crate::graph::compile_error::CompilationError;
use crate::graph::compiled::CompiledStateGraph;
use crate::graph::conditional::{ConditionalRouter, NextEntry};
use crate::graph::node::Node;
use crate::graph::node_middleware::NodeMiddleware;
use crate::state::GraphState;

/// Sentinel for graph entry: use as `from_id` in `add_edge(START, first_node_id)`.
pub const START: &str = "__start__";

/// Sentinel for graph exit: use as `to_id` in `add_edge(last_node_id, END)`.
pub const END: &str = "__end__";

/// Default cap on node visits per run.
pub const DEFAULT_RECURSION_LIMIT: usize = 25;

/// State graph: nodes plus explicit and conditional edges.
///
/// Generic over state type `S`. Build with `add_node` / `add_edge` /
/// `add_conditional_edges`, then `compile()` to obtain an executable graph. The
/// topology is fixed once compiled; only the choice among declared targets is
/// made at run time.
///
/// **Interaction**: Accepts `Arc<dyn Node<S>>`; produces `CompiledStateGraph<S>`.
pub struct StateGraph<S>
where
    S: GraphState,
{
    nodes: HashMap<String, Arc<dyn Node<S>>>,
    /// Edges (from_id, to_id).
    edges: Vec<(String, String)>,
    /// Conditional edges: source node id -> router with its declared targets.
    conditional_edges: HashMap<String, ConditionalRouter<S>>,
    /// Optional node middleware used by `compile()`. See `with_middleware`.
    middleware: Option<Arc<dyn NodeMiddleware<S>>>,
    recursion_limit: usize,
}

impl<S> Default for StateGraph<S>
where
    S: GraphState,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> StateGraph<S>
where
    S: GraphState,
{
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: Vec::new(),
            conditional_edges: HashMap::new(),
            middleware: None,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }

    /// Attaches node middleware for fluent API. Chain with `compile()`:
    /// `graph.with_middleware(m).compile()?`.
    pub fn with_middleware(self, middleware: Arc<dyn NodeMiddleware<S>>) -> Self {
        Self {
            middleware: Some(middleware),
            ..self
        }
    }

    /// Sets the maximum number of node visits per run (default 25).
    pub fn with_recursion_limit(self, recursion_limit: usize) -> Self {
        Self {
            recursion_limit,
            ..self
        }
    }

    /// Adds a node; id must be unique. Replaces if same id.
    pub fn add_node(&mut self, id: impl Into<String>, node: Arc<dyn Node<S>>) -> &mut Self {
        self.nodes.insert(id.into(), node);
        self
    }

    /// Adds an edge from `from_id` to `to_id`.
    ///
    /// Use `START` for graph entry and `END` for graph exit. Both ids (except
    /// START/END) must be registered via `add_node` before `compile()`.
    pub fn add_edge(&mut self, from_id: impl Into<String>, to_id: impl Into<String>) -> &mut Self {
        self.edges.push((from_id.into(), to_id.into()));
        self
    }

    /// Adds conditional edges from `source`: after it runs, `router(merged_state)`
    /// picks the next node among `targets`.
    ///
    /// The router may return any type convertible to a node id (e.g. a routing enum
    /// with `From<Route> for String`). Returning an id outside `targets` fails the run
    /// with `AgentError::InvalidRoute`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// graph.add_conditional_edges("check", ["fix", END], |s: &MyState| {
    ///     if s.ok { END } else { "fix" }
    /// });
    /// ```
    pub fn add_conditional_edges<I, T, F, R>(
        &mut self,
        source: impl Into<String>,
        targets: I,
        router: F,
    ) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
        F: Fn(&S) -> R + Send + Sync + 'static,
        R: Into<String>,
    {
        let targets = targets.into_iter().map(Into::into).collect();
        let path = Arc::new(move |state: &S| router(state).into());
        self.conditional_edges
            .insert(source.into(), ConditionalRouter::new(path, targets));
        self
    }

    /// Builds the executable graph using the middleware set via `with_middleware`, if any.
    ///
    /// Returns `CompilationError` if any edge references an unknown node, a
    /// conditional target is undeclared, a node has no way out, or END is
    /// unreachable. On success, the graph is immutable and ready for `invoke`.
    pub fn compile(self) -> Result<CompiledStateGraph<S>, CompilationError> {
        let middleware = self.middleware.clone();
        self.compile_internal(middleware)
    }

    /// Builds the executable graph with node middleware. The middleware wraps each node run.
    pub fn compile_with_middleware(
        self,
        middleware: Arc<dyn NodeMiddleware<S>>,
    ) -> Result<CompiledStateGraph<S>, CompilationError> {
        self.compile_internal(Some(middleware))
    }

    fn compile_internal(
        self,
        middleware: Option<Arc<dyn NodeMiddleware<S>>>,
    ) -> Result<CompiledStateGraph<S>, CompilationError> {
        for (from, to) in &self.edges {
            if from == END || to == START {
                return Err(CompilationError::InvalidChain(format!(
                    "edge {} -> {} runs against START/END direction",
                    from, to
                )));
            }
            if from != START && !self.nodes.contains_key(from) {
                return Err(CompilationError::NodeNotFound(from.clone()));
            }
            if to != END && !self.nodes.contains_key(to) {
                return Err(CompilationError::NodeNotFound(to.clone()));
            }
        }
        for (source, router) in &self.conditional_edges {
            if !self.nodes.contains_key(source) {
                return Err(CompilationError::NodeNotFound(source.clone()));
            }
            if router.targets().is_empty() {
                return Err(CompilationError::EmptyConditionalTargets(source.clone()));
            }
            for target in router.targets() {
                if target != END && !self.nodes.contains_key(target) {
                    return Err(CompilationError::InvalidConditionalTarget(target.clone()));
                }
            }
        }

        let start_edges: Vec<_> = self
            .edges
            .iter()
            .filter(|(f, _)| f == START)
            .map(|(_, t)| t.clone())
            .collect();
        let first = match start_edges.as_slice() {
            [] => return Err(CompilationError::MissingStart),
            [only] if only == END => {
                return Err(CompilationError::InvalidChain("START leads directly to END".into()))
            }
            [only] => only.clone(),
            _ => {
                return Err(CompilationError::InvalidChain(
                    "multiple edges from START (branch)".into(),
                ))
            }
        };

        let mut next_map: HashMap<String, NextEntry<S>> = HashMap::new();
        for (from, to) in self.edges.iter().filter(|(f, _)| f.as_str() != START) {
            if next_map.contains_key(from) {
                return Err(CompilationError::InvalidChain(format!(
                    "duplicate from (branch) at '{}'",
                    from
                )));
            }
            next_map.insert(from.clone(), NextEntry::Unconditional(to.clone()));
        }
        for (source, router) in &self.conditional_edges {
            if next_map.contains_key(source) {
                return Err(CompilationError::NodeHasBothEdgeAndConditional(
                    source.clone(),
                ));
            }
            next_map.insert(source.clone(), NextEntry::Conditional(router.clone()));
        }

        let mut node_ids: Vec<&String> = self.nodes.keys().collect();
        node_ids.sort();
        for id in node_ids {
            if !next_map.contains_key(id) {
                return Err(CompilationError::MissingOutgoing(id.clone()));
            }
        }

        if !end_reachable(&first, &next_map) {
            return Err(CompilationError::MissingEnd);
        }

        Ok(CompiledStateGraph {
            nodes: self.nodes,
            first_node_id: first,
            next_map,
            middleware,
            recursion_limit: self.recursion_limit,
        })
    }
}

/// Breadth-first walk over every possible transition from `first`.
fn end_reachable<S>(first: &str, next_map: &HashMap<String, NextEntry<S>>) -> bool {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<&str> = VecDeque::from([first]);
    while let Some(id) = queue.pop_front() {
        if id == END {
            return true;
        }
        if !seen.insert(id) {
            continue;
        }
        if let Some(entry) = next_map.get(id) {
            queue.extend(entry.targets());
        }
    }
    false
}
