//! Writer node: synthesizes the final financial report from the gathered context.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::Node;
use crate::llm::LlmClient;
use crate::message::Message;
use crate::state::{ResearchState, StateUpdate};

use super::WRITER;

/// Characters of PDF content kept in the writer context.
pub const PDF_CONTEXT_CHAR_LIMIT: usize = 12_000;

/// Search results listed in the writer context.
pub const MAX_CONTEXT_SEARCH_RESULTS: usize = 10;

const SECTION_SEPARATOR: &str = "\n\n---\n\n";

/// System prompt fixing the report structure and tone.
pub const WRITER_SYSTEM_PROMPT: &str = r#"You are a Senior Financial Analyst and Report Writer.
Your task is to synthesise raw research data into a polished, professional
market research report written in **financial language**.

## Report Structure
1. **Executive Summary** — 2-3 sentence overview of the key takeaways.
2. **Key Findings** — Bullet-pointed highlights with supporting data.
3. **Market Analysis** — Detailed narrative discussion using financial terminology.
4. **Data & Metrics** — Present relevant numbers in tables where appropriate.
5. **Sources & Citations** — List all sources with clickable links.
6. **Risk Factors & Caveats** — Potential risks, limitations, and disclaimers.

## Tone & Style
- Use professional, objective financial language.
- Prefer quantitative statements (e.g., "revenue grew 12% YoY") over vague language.
- Use standard financial abbreviations: YoY, QoQ, CAGR, EBITDA, P/E, etc.
- Maintain a neutral, analytical tone — avoid promotional or speculative language.
- Format the entire report in clean Markdown with headers and sub-headers.
- Include a disclaimer at the end: "This report is for informational purposes only
  and does not constitute investment advice."

Always cite your sources. If data comes from an uploaded PDF, reference it by name.
If data comes from web search, include the URL.
"#;

const NO_DATA_NOTE: &str = "## Note\nNo PDF content or web search results were available. \
Please provide your best analysis based on your training knowledge, \
and clearly indicate when information is from your general knowledge.";

fn truncate_chars(text: &str, limit: usize) -> (&str, bool) {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => (&text[..idx], true),
        None => (text, false),
    }
}

/// Builds the writer's user turn from the query, plan instructions, PDF content and
/// search results.
pub fn build_writer_context(state: &ResearchState) -> String {
    let mut parts = vec![format!("## Research Query\n{}", state.query)];

    if !state.plan.writer_instructions.is_empty() {
        parts.push(format!(
            "## Special Instructions\n{}",
            state.plan.writer_instructions
        ));
    }

    if !state.pdf_content.is_empty() {
        let (kept, truncated) = truncate_chars(&state.pdf_content, PDF_CONTEXT_CHAR_LIMIT);
        let mut block = format!("## Extracted PDF Content\n{}", kept);
        if truncated {
            block.push_str("\n\n[... PDF content truncated for length ...]");
        }
        parts.push(block);
    }

    if !state.search_results.is_empty() {
        let entries: Vec<String> = state
            .search_results
            .iter()
            .take(MAX_CONTEXT_SEARCH_RESULTS)
            .enumerate()
            .map(|(i, r)| {
                let title = if r.title.is_empty() { "Untitled" } else { r.title.as_str() };
                let url = if r.url.is_empty() { "N/A" } else { r.url.as_str() };
                format!("{}. **{}**\n   URL: {}\n   {}\n", i + 1, title, url, r.content)
            })
            .collect();
        parts.push(format!("## Web Search Results\n{}", entries.join("\n")));
    }

    if state.pdf_content.is_empty() && state.search_results.is_empty() {
        parts.push(NO_DATA_NOTE.to_string());
    }

    parts.join(SECTION_SEPARATOR)
}

/// Writer node: one LLM call; writes `report`, `status.writer` and an assistant message.
///
/// An empty model answer is an error: the run fails rather than returning a blank report.
pub struct WriterNode {
    llm: Arc<dyn LlmClient>,
}

impl WriterNode {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Node<ResearchState> for WriterNode {
    fn id(&self) -> &str {
        WRITER
    }

    async fn run(&self, state: &ResearchState) -> Result<StateUpdate, AgentError> {
        let messages = [
            Message::system(WRITER_SYSTEM_PROMPT),
            Message::user(build_writer_context(state)),
        ];
        let report = self.llm.invoke(&messages).await?.content;
        if report.trim().is_empty() {
            return Err(AgentError::ExecutionFailed(
                "writer returned an empty report".to_string(),
            ));
        }
        tracing::info!(chars = report.chars().count(), "report generated");

        Ok(StateUpdate::new()
            .with_report(report.clone())
            .with_status(WRITER, "✅ Report generated")
            .with_message(Message::assistant(report)))
    }
}
