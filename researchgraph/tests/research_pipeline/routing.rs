//! Which agents run for a given plan and set of uploaded files.

use std::sync::Arc;

use researchgraph::{MockExtractor, MockSearch, ResearchRunner, UploadedFile};

use crate::common::{collaborators, echo_writer, fast_options, hit, planner};

async fn visited(runner: &ResearchRunner, files: Vec<UploadedFile>) -> Vec<String> {
    let mut nodes = Vec::new();
    runner
        .stream_with_callback("q", files, |e| {
            if let Some(id) = e.node_id() {
                nodes.push(id.to_string());
            }
        })
        .await
        .unwrap();
    nodes
}

/// **Scenario**: the planner asks for PDFs but nothing was uploaded; the pdf agent is skipped.
#[tokio::test]
async fn pdf_flag_ignored_without_files() {
    let runner = ResearchRunner::new(
        collaborators(
            planner(r#"{"use_pdf_agent": true, "use_search_agent": false}"#),
            echo_writer(),
            Arc::new(MockSearch::new()),
            Arc::new(MockExtractor::new()),
        ),
        fast_options(),
    )
    .unwrap();
    let state = runner.invoke("q", vec![]).await.unwrap();
    assert!(!state.plan.use_pdf_agent);
    assert_eq!(visited(&runner, vec![]).await, vec!["planner", "writer"]);
}

#[tokio::test]
async fn pdf_then_search_then_writer() {
    let runner = ResearchRunner::new(
        collaborators(
            planner(
                r#"{"use_pdf_agent": true, "use_search_agent": true, "search_queries": ["ev"]}"#,
            ),
            echo_writer(),
            Arc::new(MockSearch::new().with_hits("ev", vec![hit("EV", "https://ev")])),
            Arc::new(MockExtractor::new().with_text(vec![1u8], "annual report")),
        ),
        fast_options(),
    )
    .unwrap();
    let files = vec![UploadedFile::new("a.pdf", vec![1u8])];
    assert_eq!(
        visited(&runner, files).await,
        vec!["planner", "pdf_agent", "search_agent", "writer"]
    );
}

#[tokio::test]
async fn pdf_only_skips_search() {
    let search = Arc::new(MockSearch::new());
    let runner = ResearchRunner::new(
        collaborators(
            planner(r#"{"use_pdf_agent": true, "use_search_agent": false}"#),
            echo_writer(),
            search.clone(),
            Arc::new(MockExtractor::new().with_text(vec![1u8], "annual report")),
        ),
        fast_options(),
    )
    .unwrap();
    let files = vec![UploadedFile::new("a.pdf", vec![1u8])];
    assert_eq!(
        visited(&runner, files).await,
        vec!["planner", "pdf_agent", "writer"]
    );
    assert!(search.queries().is_empty());
}

/// **Scenario**: status keys only grow; each Values snapshot keeps every earlier entry.
#[tokio::test]
async fn status_is_monotonic_across_snapshots() {
    let runner = ResearchRunner::new(
        collaborators(
            planner(r#"{"use_pdf_agent": true, "use_search_agent": true, "search_queries": ["ev"]}"#),
            echo_writer(),
            Arc::new(MockSearch::new().with_hits("ev", vec![hit("EV", "https://ev")])),
            Arc::new(MockExtractor::new().with_text(vec![1u8], "annual report")),
        ),
        fast_options(),
    )
    .unwrap();
    let mut snapshots = Vec::new();
    runner
        .stream_with_callback("q", vec![UploadedFile::new("a.pdf", vec![1u8])], |e| {
            if let researchgraph::StreamEvent::Values(s) = e {
                snapshots.push(s.status.clone());
            }
        })
        .await
        .unwrap();
    assert_eq!(snapshots.len(), 4);
    for pair in snapshots.windows(2) {
        for (key, value) in &pair[0] {
            assert_eq!(pair[1].get(key), Some(value));
        }
        assert_eq!(pair[1].len(), pair[0].len() + 1);
    }
}
