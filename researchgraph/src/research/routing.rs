//! Conditional routers after the planner and after the PDF agent.
//!
//! Routers are pure functions of the merged state. They return a `Route`, which maps
//! onto one of the node ids declared as targets when the graph is built.

use std::fmt;

use crate::state::ResearchState;

use super::{PDF_AGENT, SEARCH_AGENT, WRITER};

/// Where the pipeline goes next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    PdfAgent,
    SearchAgent,
    Writer,
}

impl Route {
    /// Node id this route leads to.
    pub fn node_id(self) -> &'static str {
        match self {
            Self::PdfAgent => PDF_AGENT,
            Self::SearchAgent => SEARCH_AGENT,
            Self::Writer => WRITER,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.node_id())
    }
}

impl From<Route> for String {
    fn from(route: Route) -> Self {
        route.node_id().to_string()
    }
}

/// PDF agent first when the plan asks for it, then search, else straight to the writer.
pub fn route_after_plan(state: &ResearchState) -> Route {
    if state.plan.use_pdf_agent {
        Route::PdfAgent
    } else if state.plan.use_search_agent {
        Route::SearchAgent
    } else {
        Route::Writer
    }
}

/// Search after extraction when the plan asks for it, else the writer.
pub fn route_after_extract(state: &ResearchState) -> Route {
    if state.plan.use_search_agent {
        Route::SearchAgent
    } else {
        Route::Writer
    }
}
