//! researchgraph-cli library: reusable market-research run logic for the binary and tests.
//!
//! Reads OpenAI and Tavily settings from `.env`, loads PDF files from disk, runs the
//! planner → pdf_agent / search_agent → writer graph with per-node progress on stderr,
//! and saves the final report.
//!
//! ## Usage
//!
//! ```rust,no_run,ignore
//! let files = researchgraph_cli::load_pdf_files(&["10-K.pdf"])?;
//! let state = researchgraph_cli::run("EV market outlook 2025", files).await?;
//! println!("{}", state.report);
//! ```

mod config;
mod input;
mod report;
mod run;

pub use config::{apply_options, load_config, Error, RunOptions};
pub use input::load_pdf_files;
pub use report::{report_file_name, save_report, REPORT_FILE_PREFIX};
pub use researchgraph::{ResearchConfig, ResearchState, UploadedFile};
pub use run::{config_summary, progress_line, run, run_with_config, run_with_options, run_with_runner};

#[cfg(test)]
mod tests;
