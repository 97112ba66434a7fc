//! Shared collaborators and options for research_pipeline tests.

use std::sync::Arc;
use std::time::Duration;

use researchgraph::{
    MockExtractor, MockLlm, MockSearch, ResearchCollaborators, RetryPolicy, RunnerOptions,
    SearchHit,
};

/// Planner mock answering with a fixed JSON plan.
pub fn planner(plan_json: &str) -> Arc<MockLlm> {
    Arc::new(MockLlm::with_response(plan_json))
}

/// Writer mock that echoes the context it was given, prefixed with a heading.
pub fn echo_writer() -> Arc<MockLlm> {
    Arc::new(MockLlm::from_fn(|messages| {
        let context = messages.last().map(|m| m.content().to_string()).unwrap_or_default();
        Ok(format!("# Report\n\n{}", context))
    }))
}

pub fn hit(title: &str, url: &str) -> SearchHit {
    SearchHit {
        title: title.into(),
        url: url.into(),
        content: format!("{} body", title),
        score: 0.5,
    }
}

pub fn collaborators(
    planner_llm: Arc<MockLlm>,
    writer_llm: Arc<MockLlm>,
    search: Arc<MockSearch>,
    extractor: Arc<MockExtractor>,
) -> ResearchCollaborators {
    ResearchCollaborators {
        planner_llm,
        writer_llm,
        search,
        extractor,
    }
}

/// Default options with millisecond retry waits.
pub fn fast_options() -> RunnerOptions {
    RunnerOptions {
        retry_policy: RetryPolicy::exponential(3, Duration::from_millis(1)),
        ..Default::default()
    }
}
