//! Table detection on extracted page text and markdown rendering.

use std::sync::OnceLock;

use regex::Regex;

/// Tab or a run of two or more spaces: a column boundary in laid-out text.
fn column_gap() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\t+| {2,}").expect("column gap pattern is valid"))
}

fn clean_cell(cell: &str) -> String {
    cell.trim().replace('\n', " ")
}

/// Renders rows as a markdown table; the first row is the header.
///
/// Returns `None` for fewer than two rows. Short rows are padded with empty cells and
/// long rows cut to the header width.
pub fn table_to_markdown<C: AsRef<str>>(table: &[Vec<C>]) -> Option<String> {
    if table.len() < 2 {
        return None;
    }
    let header: Vec<String> = table[0]
        .iter()
        .map(|c| clean_cell(c.as_ref()))
        .collect();
    let width = header.len();

    let mut lines = vec![
        format!("| {} |", header.join(" | ")),
        format!("| {} |", vec!["---"; width].join(" | ")),
    ];
    for row in &table[1..] {
        let mut cells: Vec<String> = row
            .iter()
            .map(|c| clean_cell(c.as_ref()))
            .collect();
        cells.resize(width, String::new());
        lines.push(format!("| {} |", cells.join(" | ")));
    }
    Some(lines.join("\n"))
}

/// Splits one line on column gaps; `None` unless it has at least two cells.
fn split_row(line: &str) -> Option<Vec<String>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    let cells: Vec<String> = column_gap()
        .split(trimmed)
        .map(|c| c.trim().to_string())
        .collect();
    (cells.len() >= 2).then_some(cells)
}

/// Finds tables in page text: runs of two or more consecutive lines that split into
/// the same number (at least two) of column-aligned cells.
pub fn detect_tables(page_text: &str) -> Vec<Vec<Vec<String>>> {
    let mut tables = Vec::new();
    let mut current: Vec<Vec<String>> = Vec::new();

    let mut flush = |current: &mut Vec<Vec<String>>| {
        if current.len() >= 2 {
            tables.push(std::mem::take(current));
        } else {
            current.clear();
        }
    };

    for line in page_text.lines() {
        match split_row(line) {
            Some(cells) => {
                if current.first().is_some_and(|h| h.len() != cells.len()) {
                    flush(&mut current);
                }
                current.push(cells);
            }
            None => flush(&mut current),
        }
    }
    flush(&mut current);
    tables
}
