//! PDF text and table extraction used by the PDF agent.
//!
//! `DocumentExtractor` is synchronous; the node runs it on a blocking worker.
//! With feature `pdf`, `LopdfExtractor` parses documents with `lopdf`.

pub mod table;

#[cfg(feature = "pdf")]
mod lopdf_extractor;

#[cfg(feature = "pdf")]
pub use lopdf_extractor::LopdfExtractor;

use std::collections::HashMap;
use std::sync::Mutex;

use thiserror::Error;

/// Default page ceiling per document.
pub const DEFAULT_MAX_PAGES: usize = 100;

/// Page counts for one extracted document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExtractionMetadata {
    pub page_count: usize,
    /// `min(page_count, max_pages)`.
    pub pages_processed: usize,
}

/// Text and markdown tables pulled from one document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Per-page blocks `--- Page N ---\n<text>` joined by blank lines.
    pub text: String,
    /// `**Table (Page N, #K)**\n<markdown>` entries.
    pub tables: Vec<String>,
    pub metadata: ExtractionMetadata,
}

/// Extraction failure for one document. The PDF agent records it and moves on.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Error parsing PDF: No text could be extracted from the PDF")]
    NoText,

    #[error("Error parsing PDF: {0}")]
    Parse(String),
}

/// Turns raw document bytes into text and tables.
///
/// **Interaction**: Called by `PdfAgentNode` once per uploaded file.
pub trait DocumentExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<Extraction, ExtractionError>;
}

/// Extractor answering by document bytes; unknown documents fail with `NoText`.
#[derive(Default)]
pub struct MockExtractor {
    outcomes: HashMap<Vec<u8>, Result<Extraction, ExtractionError>>,
    calls: Mutex<usize>,
}

impl MockExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Documents whose bytes equal `bytes` extract to `text` (no tables, one page).
    pub fn with_text(self, bytes: impl Into<Vec<u8>>, text: impl Into<String>) -> Self {
        self.with_extraction(
            bytes,
            Extraction {
                text: text.into(),
                tables: Vec::new(),
                metadata: ExtractionMetadata {
                    page_count: 1,
                    pages_processed: 1,
                },
            },
        )
    }

    pub fn with_extraction(mut self, bytes: impl Into<Vec<u8>>, extraction: Extraction) -> Self {
        self.outcomes.insert(bytes.into(), Ok(extraction));
        self
    }

    pub fn with_error(mut self, bytes: impl Into<Vec<u8>>, error: ExtractionError) -> Self {
        self.outcomes.insert(bytes.into(), Err(error));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.lock().map(|c| *c).unwrap_or(0)
    }
}

impl DocumentExtractor for MockExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<Extraction, ExtractionError> {
        if let Ok(mut calls) = self.calls.lock() {
            *calls += 1;
        }
        self.outcomes
            .get(bytes)
            .cloned()
            .unwrap_or(Err(ExtractionError::NoText))
    }
}
