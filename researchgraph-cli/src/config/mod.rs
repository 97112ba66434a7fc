//! Configuration for a CLI run: `ResearchConfig` from env plus command-line overrides.
//!
//! Re-exports [`RunOptions`], [`load_config`], [`apply_options`] and config [`Error`].

mod run_options;

pub use run_options::{apply_options, RunOptions};

use researchgraph::ResearchConfig;

/// Error type used across the CLI library.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Loads `.env` (if present), then reads `ResearchConfig` from the environment.
pub fn load_config() -> Result<ResearchConfig, Error> {
    dotenv::dotenv().ok();
    Ok(ResearchConfig::from_env()?)
}
