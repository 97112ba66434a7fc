//! Full run with a stubbed planner, one search hit and an echoing writer.

use std::sync::Arc;

use researchgraph::{Message, MockExtractor, MockSearch, ResearchRunner};

use crate::common::{collaborators, echo_writer, fast_options, hit, planner};

#[tokio::test]
async fn ev_market_outlook_without_files() {
    let search = Arc::new(MockSearch::new().with_hits(
        "EV market size 2025",
        vec![hit("Global EV Outlook", "https://iea.example/ev")],
    ));
    let planner_llm = planner(
        r#"```json
{"goal": "EV outlook", "use_pdf_agent": false, "use_search_agent": true,
 "search_queries": ["EV market size 2025"], "writer_instructions": "be brief"}
```"#,
    );
    let runner = ResearchRunner::new(
        collaborators(
            planner_llm.clone(),
            echo_writer(),
            search.clone(),
            Arc::new(MockExtractor::new()),
        ),
        fast_options(),
    )
    .unwrap();

    let state = runner.invoke("EV market outlook 2025", vec![]).await.unwrap();

    assert!(!state.report.is_empty());
    assert!(state.report.contains("Global EV Outlook"));
    assert_eq!(state.pdf_content, "");
    assert_eq!(
        state.status.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["planner", "search_agent", "writer"]
    );
    assert_eq!(state.status["planner"], "✅ Plan created");
    assert_eq!(state.status["search_agent"], "✅ Found 1 results");
    assert_eq!(state.status["writer"], "✅ Report generated");
    assert_eq!(state.plan.goal, "EV outlook");
    assert_eq!(search.queries(), vec!["EV market size 2025"]);
    assert_eq!(state.messages.first(), Some(&Message::user("EV market outlook 2025")));
    assert_eq!(state.messages.last().map(|m| m.role()), Some("assistant"));

    let planner_turns = planner_llm.calls();
    assert_eq!(planner_turns.len(), 1);
    assert!(planner_turns[0]
        .iter()
        .any(|m| m.content().contains("No PDF files uploaded.")));
}

/// **Scenario**: unparseable planner output falls back to a default plan and still reports.
#[tokio::test]
async fn planner_garbage_falls_back_and_completes() {
    let search = Arc::new(MockSearch::new());
    let runner = ResearchRunner::new(
        collaborators(
            planner("I cannot produce JSON today."),
            echo_writer(),
            search.clone(),
            Arc::new(MockExtractor::new()),
        ),
        fast_options(),
    )
    .unwrap();
    let state = runner.invoke("lithium prices", vec![]).await.unwrap();
    assert!(state.plan.use_search_agent);
    assert!(!search.queries().is_empty());
    assert_eq!(state.status["planner"], "⚠️ Plan created from defaults");
    assert!(!state.report.is_empty());
}
