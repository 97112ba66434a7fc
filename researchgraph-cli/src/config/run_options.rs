//! Optional overrides for a research run (CLI args or programmatic).
//!
//! Callers build a `RunOptions` and pass it to [`run_with_options`](crate::run_with_options)
//! to get env-based config with overrides applied.

use researchgraph::{ResearchConfig, SearchDepth};

/// Optional overrides for a run. Only set fields replace the env-based value.
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    /// Override the chat model used by planner and writer.
    pub model: Option<String>,
    /// Override sampling temperature (0–2).
    pub temperature: Option<f32>,
    /// Override results requested per search query.
    pub max_results: Option<usize>,
    /// Override Tavily search depth.
    pub search_depth: Option<SearchDepth>,
    /// Override the PDF page ceiling.
    pub pdf_max_pages: Option<usize>,
    /// Node enter/exit logging and a config summary on stderr.
    pub verbose: bool,
}

/// Applies the set fields of `options` to `config`.
pub fn apply_options(config: &mut ResearchConfig, options: &RunOptions) {
    if let Some(model) = &options.model {
        config.model = model.clone();
    }
    if let Some(t) = options.temperature {
        config.temperature = t;
    }
    if let Some(n) = options.max_results {
        config.search_max_results = n;
    }
    if let Some(depth) = options.search_depth {
        config.search_depth = depth;
    }
    if let Some(pages) = options.pdf_max_pages {
        config.pdf_max_pages = pages;
    }
}
