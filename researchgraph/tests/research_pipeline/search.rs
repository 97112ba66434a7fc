//! Search agent inside the pipeline: dedup, retries, partial failure.

use std::sync::Arc;

use researchgraph::{MockExtractor, MockSearch, ResearchRunner, SearchError};

use crate::common::{collaborators, echo_writer, fast_options, hit, planner};

/// **Scenario**: results keep first-seen order and a URL repeated across queries appears once.
#[tokio::test]
async fn results_deduplicated_by_url_in_first_seen_order() {
    let search = MockSearch::new()
        .with_hits("a", vec![hit("A1", "https://1"), hit("A2", "https://2")])
        .with_hits("b", vec![hit("B2", "https://2"), hit("B3", "https://3")]);
    let runner = ResearchRunner::new(
        collaborators(
            planner(r#"{"use_search_agent": true, "search_queries": ["a", "b"]}"#),
            echo_writer(),
            Arc::new(search),
            Arc::new(MockExtractor::new()),
        ),
        fast_options(),
    )
    .unwrap();
    let state = runner.invoke("q", vec![]).await.unwrap();
    let urls: Vec<&str> = state.search_results.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(urls, vec!["https://1", "https://2", "https://3"]);
    assert_eq!(state.search_results[1].title, "A2");
    assert_eq!(state.search_results[2].query, "b");
    assert_eq!(state.status["search_agent"], "✅ Found 3 results");
}

/// **Scenario**: one query fails on every attempt, the other succeeds; the run completes.
#[tokio::test]
async fn failing_query_is_retried_then_skipped() {
    let search = Arc::new(
        MockSearch::new()
            .with_failure("broken", "connection reset")
            .with_hits("ok", vec![hit("OK", "https://ok")]),
    );
    let runner = ResearchRunner::new(
        collaborators(
            planner(r#"{"use_search_agent": true, "search_queries": ["broken", "ok"]}"#),
            echo_writer(),
            search.clone(),
            Arc::new(MockExtractor::new()),
        ),
        fast_options(),
    )
    .unwrap();
    let state = runner.invoke("q", vec![]).await.unwrap();
    assert_eq!(search.calls("broken"), 3);
    assert_eq!(search.calls("ok"), 1);
    assert_eq!(state.search_results.len(), 1);
    assert_eq!(state.search_results[0].url, "https://ok");
    assert!(!state.report.is_empty());
}

#[tokio::test]
async fn transient_failure_recovers_on_retry() {
    let search = Arc::new(MockSearch::new().with_outcomes(
        "ev",
        vec![
            Err(SearchError::Transport("timeout".into())),
            Ok(vec![hit("EV", "https://ev")]),
        ],
    ));
    let runner = ResearchRunner::new(
        collaborators(
            planner(r#"{"use_search_agent": true, "search_queries": ["ev"]}"#),
            echo_writer(),
            search.clone(),
            Arc::new(MockExtractor::new()),
        ),
        fast_options(),
    )
    .unwrap();
    let state = runner.invoke("q", vec![]).await.unwrap();
    assert_eq!(search.calls("ev"), 2);
    assert_eq!(state.search_results.len(), 1);
}

/// **Scenario**: without a search credential the run fails instead of writing a report.
#[tokio::test]
async fn missing_credential_aborts_run() {
    let search = Arc::new(MockSearch::new().with_outcomes(
        "ev",
        vec![Err(SearchError::MissingCredential("TAVILY_API_KEY"))],
    ));
    let writer = echo_writer();
    let runner = ResearchRunner::new(
        collaborators(
            planner(r#"{"use_search_agent": true, "search_queries": ["ev"]}"#),
            writer.clone(),
            search.clone(),
            Arc::new(MockExtractor::new()),
        ),
        fast_options(),
    )
    .unwrap();
    let err = runner.invoke("q", vec![]).await.unwrap_err();
    assert!(err.to_string().contains("TAVILY_API_KEY"));
    assert_eq!(search.calls("ev"), 1);
    assert!(writer.calls().is_empty());
}
