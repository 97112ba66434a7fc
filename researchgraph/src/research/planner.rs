//! Planner node: turns the query into an execution plan via the LLM.
//!
//! The model is asked for a JSON plan. Its answer goes through [`parse_plan`], which
//! never fails: when the text cannot be read as a plan, a default plan is used.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use regex::Regex;

use crate::error::AgentError;
use crate::graph::Node;
use crate::llm::LlmClient;
use crate::message::Message;
use crate::state::{Plan, ResearchState, StateUpdate, UploadedFile};

use super::PLANNER;

/// System prompt describing the plan schema.
pub const PLANNER_SYSTEM_PROMPT: &str = r#"You are a Market Research Planner. Your job is to analyse
the user's research query and produce a structured execution plan.

You MUST respond with a valid JSON object (no markdown fences) like this:

{
  "goal": "Brief summary of what the user wants",
  "use_pdf_agent": true/false,
  "pdf_instructions": "What to look for in the uploaded PDFs (or empty string)",
  "use_search_agent": true/false,
  "search_queries": ["query1", "query2"],
  "writer_instructions": "Special formatting or focus instructions for the report"
}

Rules:
- Set use_pdf_agent to true ONLY if the user has uploaded PDF files.
- Set use_search_agent to true when the query would benefit from current web data.
- Generate up to 3 focused search queries that cover different angles of the topic.
- Keep instructions concise and actionable.
"#;

/// Outcome of reading the model's plan text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlanParse {
    /// The trimmed text was a JSON plan.
    Parsed(Plan),
    /// A JSON plan was found after stripping fences or surrounding prose.
    Cleaned(Plan),
    /// Nothing parsed; the default plan for the query.
    Fallback(Plan),
}

impl PlanParse {
    pub fn plan(&self) -> &Plan {
        match self {
            Self::Parsed(p) | Self::Cleaned(p) | Self::Fallback(p) => p,
        }
    }

    pub fn into_plan(self) -> Plan {
        match self {
            Self::Parsed(p) | Self::Cleaned(p) | Self::Fallback(p) => p,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

fn code_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"```(?:json|JSON)?\s*([\s\S]*?)```").expect("code fence pattern is valid")
    })
}

/// Body of the first code fence, else the outermost `{...}` span.
fn strip_wrapping(text: &str) -> Option<&str> {
    if let Some(body) = code_fence().captures(text).and_then(|c| c.get(1)) {
        return Some(body.as_str().trim());
    }
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

fn default_plan(query: &str, has_files: bool) -> Plan {
    Plan {
        goal: query.to_string(),
        use_pdf_agent: has_files,
        pdf_instructions: "Extract all relevant content".to_string(),
        use_search_agent: true,
        search_queries: vec![query.to_string()],
        writer_instructions: "Write a comprehensive financial analysis".to_string(),
    }
}

/// Reads a plan from model output in three stages: as-is, after stripping wrapping,
/// then the default plan.
pub fn parse_plan(raw: &str, query: &str, has_files: bool) -> PlanParse {
    let trimmed = raw.trim();
    if let Ok(plan) = serde_json::from_str::<Plan>(trimmed) {
        return PlanParse::Parsed(plan);
    }
    if let Some(inner) = strip_wrapping(trimmed) {
        if let Ok(plan) = serde_json::from_str::<Plan>(inner) {
            return PlanParse::Cleaned(plan);
        }
    }
    PlanParse::Fallback(default_plan(query, has_files))
}

/// User turn sent to the planner: the query plus the uploaded file names.
pub fn planner_user_message(query: &str, files: &[UploadedFile]) -> String {
    let mut content = format!("Research query: {}\n\n", query);
    if files.is_empty() {
        content.push_str("No PDF files uploaded.\n");
    } else {
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        content.push_str(&format!("Uploaded PDF files: {}\n", names.join(", ")));
    }
    content
}

/// Planner node: one LLM call, writes `plan` and `status.planner`.
///
/// LLM errors abort the run; unreadable output does not.
///
/// **Interaction**: Implements `Node<ResearchState>`; its plan drives
/// `route_after_plan` and `route_after_extract`.
pub struct PlannerNode {
    llm: Arc<dyn LlmClient>,
    max_search_queries: usize,
}

impl PlannerNode {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm,
            max_search_queries: 5,
        }
    }

    /// Caps the number of search queries kept from the plan.
    pub fn with_max_search_queries(mut self, max: usize) -> Self {
        self.max_search_queries = max;
        self
    }

    fn normalize(&self, mut plan: Plan, has_files: bool) -> Plan {
        if !has_files {
            plan.use_pdf_agent = false;
        }
        plan.search_queries = plan
            .search_queries
            .into_iter()
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty())
            .take(self.max_search_queries)
            .collect();
        plan
    }
}

#[async_trait]
impl Node<ResearchState> for PlannerNode {
    fn id(&self) -> &str {
        PLANNER
    }

    async fn run(&self, state: &ResearchState) -> Result<StateUpdate, AgentError> {
        let has_files = !state.uploaded_files.is_empty();
        let messages = [
            Message::system(PLANNER_SYSTEM_PROMPT),
            Message::user(planner_user_message(&state.query, &state.uploaded_files)),
        ];
        let response = self.llm.invoke(&messages).await?;

        let parsed = parse_plan(&response.content, &state.query, has_files);
        let status = match &parsed {
            PlanParse::Parsed(_) | PlanParse::Cleaned(_) => "✅ Plan created",
            PlanParse::Fallback(_) => {
                tracing::error!(raw = %response.content, "planner returned invalid JSON, using default plan");
                "⚠️ Plan created from defaults"
            }
        };
        let plan = self.normalize(parsed.into_plan(), has_files);
        tracing::info!(
            goal = %plan.goal,
            use_pdf_agent = plan.use_pdf_agent,
            use_search_agent = plan.use_search_agent,
            queries = plan.search_queries.len(),
            "plan created"
        );

        Ok(StateUpdate::new()
            .with_plan(plan)
            .with_status(PLANNER, status))
    }
}
