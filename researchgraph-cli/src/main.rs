//! market-research binary: parses the query and PDF paths, runs the research graph,
//! prints the report on stdout and optionally saves it.

use std::path::PathBuf;

use clap::Parser;
use researchgraph::SearchDepth;
use researchgraph_cli::{load_pdf_files, run_with_options, save_report, RunOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "market-research")]
#[command(about = "Multi-agent market research: planner → PDF / web search → financial report")]
struct Args {
    /// Research question, e.g. "Analyse the EV market outlook for 2025".
    #[arg(required = true, trailing_var_arg = true)]
    query: Vec<String>,

    /// PDF document to analyse (repeatable).
    #[arg(short, long = "file", value_name = "PATH")]
    files: Vec<PathBuf>,

    /// Directory to save the report into as a timestamped markdown file.
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Chat model for planner and writer (overrides OPENAI_MODEL).
    #[arg(long)]
    model: Option<String>,

    /// Sampling temperature (overrides OPENAI_TEMPERATURE).
    #[arg(long)]
    temperature: Option<f32>,

    /// Results per search query (overrides TAVILY_MAX_RESULTS).
    #[arg(long)]
    max_results: Option<usize>,

    /// Search depth: basic or advanced (overrides TAVILY_SEARCH_DEPTH).
    #[arg(long)]
    search_depth: Option<SearchDepth>,

    /// Debug logs, node enter/exit timing and a config summary on stderr.
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn run_options(&self) -> RunOptions {
        RunOptions {
            model: self.model.clone(),
            temperature: self.temperature,
            max_results: self.max_results,
            search_depth: self.search_depth,
            pdf_max_pages: None,
            verbose: self.verbose,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let query = args.query.join(" ").trim().to_string();
    eprintln!("🔬 Researching: {}", query);

    let files = match load_pdf_files(&args.files) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(2);
        }
    };

    let state = match run_with_options(&query, files, &args.run_options()).await {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Research pipeline error: {}", e);
            std::process::exit(1);
        }
    };

    println!("{}", state.report);

    if let Some(dir) = &args.output_dir {
        match save_report(dir, &state.report, &chrono::Local::now()) {
            Ok(path) => eprintln!("📥 Report saved to {}", path.display()),
            Err(e) => {
                eprintln!("❌ Could not save report: {}", e);
                std::process::exit(1);
            }
        }
    }
}
