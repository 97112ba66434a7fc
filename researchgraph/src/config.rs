//! Research config: LLM, search and PDF settings. Filled from env / .env.
//!
//! Read once per process and passed by reference; nothing here is mutated after load.
//! Credentials are optional at load time: a missing key only fails the run that needs it.

use std::str::FromStr;

use thiserror::Error;

use crate::pdf::DEFAULT_MAX_PAGES;
use crate::search::{SearchDepth, SearchOptions};

/// Config loading error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but does not parse as the expected type.
    #[error("invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Research config: LLM, web search and PDF extraction settings.
#[derive(Clone, Debug, PartialEq)]
pub struct ResearchConfig {
    /// OpenAI API key. `None` fails the planner at first use.
    pub openai_api_key: Option<String>,
    /// OpenAI API base URL, e.g. `https://api.openai.com/v1`.
    pub openai_api_base: String,
    /// Model name. Default `gpt-4o`.
    pub model: String,
    /// Sampling temperature for planner and writer. Default 0.3.
    pub temperature: f32,
    /// Completion cap for the writer. Default 4096.
    pub writer_max_tokens: u32,
    /// Tavily API key. `None` fails the search agent at first use.
    pub tavily_api_key: Option<String>,
    /// Results per search query. Default 5.
    pub search_max_results: usize,
    /// Tavily search depth. Default advanced.
    pub search_depth: SearchDepth,
    /// Page ceiling per PDF. Default 100.
    pub pdf_max_pages: usize,
    /// Whether to look for tables in PDFs. Default true.
    pub pdf_table_extraction: bool,
    /// Cap on planner search queries. Default 5.
    pub planner_max_queries: usize,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_api_base: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o".to_string(),
            temperature: 0.3,
            writer_max_tokens: 4096,
            tavily_api_key: None,
            search_max_results: 5,
            search_depth: SearchDepth::Advanced,
            pdf_max_pages: DEFAULT_MAX_PAGES,
            pdf_table_extraction: true,
            planner_max_queries: 5,
        }
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}

fn parse_bool(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: bool,
) -> Result<bool, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "" => Ok(default),
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidValue {
                key,
                value: raw,
                reason: "expected true or false".to_string(),
            }),
        },
    }
}

impl ResearchConfig {
    /// Fill config from env vars. Call `dotenv::dotenv().ok()` first to pick up `.env`.
    ///
    /// `OPENAI_API_KEY`, `TAVILY_API_KEY` optional; `OPENAI_API_BASE`, `OPENAI_MODEL`,
    /// `OPENAI_TEMPERATURE`, `WRITER_MAX_TOKENS`, `TAVILY_MAX_RESULTS`,
    /// `TAVILY_SEARCH_DEPTH` (basic|advanced), `PDF_MAX_PAGES`, `PDF_TABLE_EXTRACTION`,
    /// `PLANNER_MAX_QUERIES` have defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` but reads variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let text = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            openai_api_key: text("OPENAI_API_KEY"),
            openai_api_base: text("OPENAI_API_BASE").unwrap_or(defaults.openai_api_base),
            model: text("OPENAI_MODEL").unwrap_or(defaults.model),
            temperature: parse_var(&lookup, "OPENAI_TEMPERATURE", defaults.temperature)?,
            writer_max_tokens: parse_var(&lookup, "WRITER_MAX_TOKENS", defaults.writer_max_tokens)?,
            tavily_api_key: text("TAVILY_API_KEY"),
            search_max_results: parse_var(
                &lookup,
                "TAVILY_MAX_RESULTS",
                defaults.search_max_results,
            )?,
            search_depth: parse_var(&lookup, "TAVILY_SEARCH_DEPTH", defaults.search_depth)?,
            pdf_max_pages: parse_var(&lookup, "PDF_MAX_PAGES", defaults.pdf_max_pages)?,
            pdf_table_extraction: parse_bool(
                &lookup,
                "PDF_TABLE_EXTRACTION",
                defaults.pdf_table_extraction,
            )?,
            planner_max_queries: parse_var(
                &lookup,
                "PLANNER_MAX_QUERIES",
                defaults.planner_max_queries,
            )?,
        })
    }

    /// Search options derived from this config.
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            max_results: self.search_max_results,
            depth: self.search_depth,
        }
    }
}
