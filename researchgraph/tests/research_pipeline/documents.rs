//! Uploaded documents: extraction failures stay inline and the run continues.

use std::sync::Arc;

use researchgraph::{ExtractionError, MockExtractor, MockSearch, ResearchRunner, UploadedFile};

use crate::common::{collaborators, echo_writer, fast_options, planner};

/// **Scenario**: a PDF with no text yields an inline error marker and the writer still runs.
#[tokio::test]
async fn textless_pdf_reaches_writer_with_marker() {
    let writer = echo_writer();
    let runner = ResearchRunner::new(
        collaborators(
            planner(r#"{"use_pdf_agent": true, "use_search_agent": false}"#),
            writer.clone(),
            Arc::new(MockSearch::new()),
            Arc::new(MockExtractor::new().with_error(vec![9u8], ExtractionError::NoText)),
        ),
        fast_options(),
    )
    .unwrap();
    let state = runner
        .invoke("q", vec![UploadedFile::new("scan.pdf", vec![9u8])])
        .await
        .unwrap();

    assert!(state.pdf_content.contains("## 📄 scan.pdf"));
    assert!(state
        .pdf_content
        .contains("⚠️ Error extracting: Error parsing PDF: No text could be extracted from the PDF"));
    assert_eq!(state.status["pdf_agent"], "⚠️ Extracted 0 of 1 PDF(s)");
    assert!(!state.report.is_empty());
    assert_eq!(writer.calls().len(), 1);
}

#[tokio::test]
async fn extracted_text_reaches_writer_context() {
    let writer = echo_writer();
    let runner = ResearchRunner::new(
        collaborators(
            planner(r#"{"use_pdf_agent": true}"#),
            writer.clone(),
            Arc::new(MockSearch::new()),
            Arc::new(MockExtractor::new().with_text(vec![1u8], "Revenue grew 12%")),
        ),
        fast_options(),
    )
    .unwrap();
    let state = runner
        .invoke("q", vec![UploadedFile::new("10k.pdf", vec![1u8])])
        .await
        .unwrap();
    assert_eq!(state.status["pdf_agent"], "✅ Extracted 1 PDF(s)");
    assert!(state.report.contains("Revenue grew 12%"));
}
