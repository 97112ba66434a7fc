//! Graph state: the record threaded through every node, and how partial updates merge into it.
//!
//! A node returns `S::Update` (only the keys it writes); the graph calls
//! [`GraphState::apply`] to merge it. Merge rules are per field, built from the
//! functions in [`reducer`].

pub mod reducer;
mod research;

use std::fmt::Debug;

pub use research::{Plan, ResearchState, SearchResult, StateUpdate, UploadedFile};

/// State type usable in a `StateGraph`.
///
/// `Update` is the partial-update type returned by nodes; `apply` merges one into
/// the running state. Implementations decide per field whether an update
/// overwrites or accumulates.
pub trait GraphState: Clone + Send + Sync + Debug + 'static {
    /// Partial update produced by one node run.
    type Update: Clone + Send + Sync + Debug + 'static;

    /// Merges `update` into `self`.
    fn apply(&mut self, update: Self::Update);
}
