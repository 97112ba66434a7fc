//! Run entry points: run with default config, run_with_options, run_with_config.
//!
//! All of them stream the graph, print one progress line per node to stderr and
//! return the final state. The report itself is left to the caller.

mod config_summary;
mod progress;

pub use config_summary::config_summary;
pub use progress::progress_line;

use researchgraph::{ResearchConfig, ResearchRunner, ResearchState, UploadedFile};

use crate::config::{apply_options, load_config, Error, RunOptions};

/// Runs the pipeline with config from `.env` / the environment.
pub async fn run(query: &str, files: Vec<UploadedFile>) -> Result<ResearchState, Error> {
    run_with_options(query, files, &RunOptions::default()).await
}

/// Runs the pipeline with env config plus `options` overrides.
pub async fn run_with_options(
    query: &str,
    files: Vec<UploadedFile>,
    options: &RunOptions,
) -> Result<ResearchState, Error> {
    let mut config = load_config()?;
    apply_options(&mut config, options);
    run_with_config(&config, query, files, options.verbose).await
}

/// Builds the OpenAI / Tavily / lopdf runner from `config` and runs it.
pub async fn run_with_config(
    config: &ResearchConfig,
    query: &str,
    files: Vec<UploadedFile>,
    verbose: bool,
) -> Result<ResearchState, Error> {
    if verbose {
        eprintln!("{}", config_summary(config));
    }
    let runner = ResearchRunner::from_config(config, verbose)?;
    run_with_runner(&runner, query, files).await
}

/// Streams `runner`, printing progress lines to stderr; returns the final state.
pub async fn run_with_runner(
    runner: &ResearchRunner,
    query: &str,
    files: Vec<UploadedFile>,
) -> Result<ResearchState, Error> {
    tracing::info!(query, files = files.len(), "research run started");
    let state = runner
        .stream_with_callback(query, files, |event| {
            if let Some(line) = progress_line(event) {
                eprintln!("{}", line);
            }
        })
        .await?;
    Ok(state)
}
