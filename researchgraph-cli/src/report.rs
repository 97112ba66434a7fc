//! Saving the final report as a timestamped markdown file.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

/// File name stem shared by every saved report.
pub const REPORT_FILE_PREFIX: &str = "market_research_report";

/// `market_research_report_YYYYMMDD_HHMMSS.md` for `at`.
pub fn report_file_name(at: &DateTime<Local>) -> String {
    format!("{}_{}.md", REPORT_FILE_PREFIX, at.format("%Y%m%d_%H%M%S"))
}

/// Writes `report` into `dir` (created if missing) and returns the file path.
pub fn save_report(dir: &Path, report: &str, at: &DateTime<Local>) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(report_file_name(at));
    std::fs::write(&path, report)?;
    Ok(path)
}
