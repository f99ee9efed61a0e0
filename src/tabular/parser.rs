//! Preview-capped comma-delimited parsing per INGEST.md §3
//!
//! The parser is total: malformed input degrades to partial or empty
//! rows, never an error. A comma always splits; there is no support for
//! embedded commas or quote escaping (a known limitation carried from
//! the system of record for these uploads).

use std::sync::Arc;

use super::row::ParsedRow;

/// Parses raw text into at most `max_preview_rows` data rows.
///
/// Blank (whitespace-only) lines are dropped wherever they appear. The
/// first remaining line is the header; cells are trimmed and one
/// surrounding double-quote pair is stripped. Fewer than two non-blank
/// lines yield an empty vector.
pub fn parse(raw_text: &str, max_preview_rows: usize) -> Vec<ParsedRow> {
    let lines: Vec<&str> = raw_text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();

    if lines.len() < 2 {
        return Vec::new();
    }

    let headers: Arc<[String]> = lines[0].split(',').map(clean_cell).collect();

    lines[1..]
        .iter()
        .take(max_preview_rows)
        .map(|line| {
            let values = line.split(',').map(clean_cell).collect();
            ParsedRow::new(Arc::clone(&headers), values)
        })
        .collect()
}

/// Counts data rows in the full text: non-blank lines after the header.
///
/// Empty and header-only input count as zero.
pub fn count_data_rows(raw_text: &str) -> u64 {
    let non_blank = raw_text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .count() as u64;
    non_blank.saturating_sub(1)
}

/// Trims a cell and strips one surrounding double-quote pair.
fn clean_cell(cell: &str) -> String {
    let trimmed = cell.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed)
        .to_string()
}
