//! `DocumentExtractor` backed by `lopdf`.

use lopdf::Document;

use super::table::{detect_tables, table_to_markdown};
use super::{DocumentExtractor, Extraction, ExtractionError, ExtractionMetadata, DEFAULT_MAX_PAGES};

/// Extracts per-page text with `lopdf` and, optionally, column-aligned tables.
///
/// Pages past `max_pages` are neither read nor scanned for tables.
#[derive(Clone, Debug)]
pub struct LopdfExtractor {
    max_pages: usize,
    extract_tables: bool,
}

impl Default for LopdfExtractor {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            extract_tables: true,
        }
    }
}

impl LopdfExtractor {
    pub fn new(max_pages: usize, extract_tables: bool) -> Self {
        Self {
            max_pages,
            extract_tables,
        }
    }
}

impl DocumentExtractor for LopdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<Extraction, ExtractionError> {
        let doc = Document::load_mem(bytes).map_err(|e| ExtractionError::Parse(e.to_string()))?;
        let pages = doc.get_pages();
        let page_count = pages.len();

        let mut text_parts = Vec::new();
        let mut tables = Vec::new();

        for &page_no in pages.keys().take(self.max_pages) {
            let page_text = match doc.extract_text(&[page_no]) {
                Ok(t) => t,
                Err(e) => {
                    tracing::warn!(page = page_no, error = %e, "could not extract page text");
                    continue;
                }
            };
            let trimmed = page_text.trim();
            if !trimmed.is_empty() {
                text_parts.push(format!("--- Page {} ---\n{}", page_no, trimmed));
            }

            if self.extract_tables {
                for (idx, rows) in detect_tables(&page_text).iter().enumerate() {
                    if let Some(md) = table_to_markdown(rows) {
                        tables.push(format!("**Table (Page {}, #{})**\n{}", page_no, idx + 1, md));
                    }
                }
            }
        }

        if text_parts.is_empty() {
            return Err(ExtractionError::NoText);
        }

        Ok(Extraction {
            text: text_parts.join("\n\n"),
            tables,
            metadata: ExtractionMetadata {
                page_count,
                pages_processed: page_count.min(self.max_pages),
            },
        })
    }
}
