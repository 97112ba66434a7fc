//! Config summary printed to stderr in verbose mode. Credentials show as set/unset only.

use researchgraph::ResearchConfig;

fn presence(value: &Option<String>) -> &'static str {
    match value {
        Some(v) if !v.is_empty() => "set",
        _ => "unset",
    }
}

/// Multi-line summary of `config`, one section per collaborator.
pub fn config_summary(config: &ResearchConfig) -> String {
    [
        format!(
            "llm: model={} api_base={} temperature={} writer_max_tokens={} api_key={}",
            config.model,
            config.openai_api_base,
            config.temperature,
            config.writer_max_tokens,
            presence(&config.openai_api_key),
        ),
        format!(
            "search: provider=tavily depth={} max_results={} planner_max_queries={} api_key={}",
            config.search_depth,
            config.search_max_results,
            config.planner_max_queries,
            presence(&config.tavily_api_key),
        ),
        format!(
            "pdf: max_pages={} tables={}",
            config.pdf_max_pages, config.pdf_table_extraction
        ),
    ]
    .join("\n")
}
