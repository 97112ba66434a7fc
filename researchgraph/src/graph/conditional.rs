//! Conditional edges: a routing function plus the set of targets it may choose from.

use std::sync::Arc;

use crate::error::AgentError;

/// Routing function: merged state in, next node id (or `END`) out.
pub type ConditionalRouterFn<S> = Arc<dyn Fn(&S) -> String + Send + Sync>;

/// Router attached to one source node.
///
/// Targets are declared up front and validated at compile time; at run time the
/// router's answer must be one of them.
pub struct ConditionalRouter<S> {
    path: ConditionalRouterFn<S>,
    targets: Vec<String>,
}

impl<S> Clone for ConditionalRouter<S> {
    fn clone(&self) -> Self {
        Self {
            path: Arc::clone(&self.path),
            targets: self.targets.clone(),
        }
    }
}

impl<S> ConditionalRouter<S> {
    pub fn new(path: ConditionalRouterFn<S>, targets: Vec<String>) -> Self {
        Self { path, targets }
    }

    /// Declared targets, in declaration order.
    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    /// Calls the router and checks the answer against the declared targets.
    pub fn resolve(&self, source: &str, state: &S) -> Result<String, AgentError> {
        let target = (self.path)(state);
        if self.targets.iter().any(|t| *t == target) {
            Ok(target)
        } else {
            Err(AgentError::InvalidRoute {
                node: source.to_string(),
                target,
            })
        }
    }
}

/// How the compiled graph leaves a node.
pub(super) enum NextEntry<S> {
    Unconditional(String),
    Conditional(ConditionalRouter<S>),
}

impl<S> Clone for NextEntry<S> {
    fn clone(&self) -> Self {
        match self {
            Self::Unconditional(id) => Self::Unconditional(id.clone()),
            Self::Conditional(router) => Self::Conditional(router.clone()),
        }
    }
}

impl<S> NextEntry<S> {
    /// Every node id this entry can lead to.
    pub(super) fn targets(&self) -> Vec<&str> {
        match self {
            Self::Unconditional(id) => vec![id.as_str()],
            Self::Conditional(router) => router.targets().iter().map(String::as_str).collect(),
        }
    }
}
