//! PDF agent node: extracts text and tables from every uploaded document.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::Node;
use crate::pdf::{DocumentExtractor, Extraction, ExtractionError};
use crate::state::{ResearchState, StateUpdate, UploadedFile};

use super::PDF_AGENT;

/// PDF agent node: writes `pdf_content` and `status.pdf_agent`.
///
/// A document that fails to extract gets an inline error marker under its heading;
/// the other documents and the run carry on. Extraction is CPU-bound and runs on
/// tokio's blocking pool, one document at a time.
pub struct PdfAgentNode {
    extractor: Arc<dyn DocumentExtractor>,
}

impl PdfAgentNode {
    pub fn new(extractor: Arc<dyn DocumentExtractor>) -> Self {
        Self { extractor }
    }

    async fn extract_one(&self, file: &UploadedFile) -> Result<Extraction, ExtractionError> {
        let extractor = Arc::clone(&self.extractor);
        let bytes = file.bytes.clone();
        tokio::task::spawn_blocking(move || extractor.extract(&bytes))
            .await
            .unwrap_or_else(|e| Err(ExtractionError::Parse(format!("extractor task failed: {}", e))))
    }
}

#[async_trait]
impl Node<ResearchState> for PdfAgentNode {
    fn id(&self) -> &str {
        PDF_AGENT
    }

    async fn run(&self, state: &ResearchState) -> Result<StateUpdate, AgentError> {
        let files = &state.uploaded_files;
        if files.is_empty() {
            return Ok(StateUpdate::new()
                .with_pdf_content("")
                .with_status(PDF_AGENT, "⚠️ No PDFs to process"));
        }
        if !state.plan.pdf_instructions.is_empty() {
            tracing::debug!(instructions = %state.plan.pdf_instructions, "pdf instructions");
        }

        let mut sections = Vec::with_capacity(files.len());
        let mut tables = Vec::new();
        let mut extracted = 0usize;

        for file in files {
            match self.extract_one(file).await {
                Ok(extraction) => {
                    extracted += 1;
                    tracing::info!(
                        file = %file.name,
                        pages = extraction.metadata.pages_processed,
                        tables = extraction.tables.len(),
                        "extracted pdf"
                    );
                    sections.push(format!("## 📄 {}\n\n{}", file.name, extraction.text));
                    tables.extend(
                        extraction
                            .tables
                            .iter()
                            .map(|t| format!("### Tables from {}\n{}", file.name, t)),
                    );
                }
                Err(e) => {
                    tracing::warn!(file = %file.name, error = %e, "failed to extract pdf");
                    sections.push(format!("## 📄 {}\n\n⚠️ Error extracting: {}", file.name, e));
                }
            }
        }

        let mut content = sections.join("\n\n");
        if !tables.is_empty() {
            content.push_str("\n\n---\n# Extracted Tables\n\n");
            content.push_str(&tables.join("\n\n"));
        }

        let status = if extracted == files.len() {
            format!("✅ Extracted {} PDF(s)", files.len())
        } else {
            format!("⚠️ Extracted {} of {} PDF(s)", extracted, files.len())
        };

        Ok(StateUpdate::new()
            .with_pdf_content(content)
            .with_status(PDF_AGENT, status))
    }
}
