//! Parser for the ASCII-boxed issue tables printed by the error-tracker CLI.
//!
//! ```text
//! +------------+----------+---------------------+-------------+------------+-------+
//! | Issue ID   | Short ID | Title               | Last seen   | Status     | Level |
//! +------------+----------+---------------------+-------------+------------+-------+
//! | 4011223344 | TICK-1A  | KeyError: 'seat'    | 2 hours ago | unresolved | error |
//! ```
//!
//! Column boundaries come from where each title sits in the header line, so a
//! value is the slice from its column offset up to the next recognized
//! column's offset.

#![allow(missing_docs)]

/// One row of the issue table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueRecord {
    pub id: String,
    pub short_id: String,
    pub title: String,
    pub last_seen: String,
    pub status: String,
    pub level: String,
}

/// Column titles recognized in the header row, in record-field order.
const COLUMNS: [&str; 6] = ["Issue ID", "Short ID", "Title", "Last seen", "Status", "Level"];

/// Parse every data row following the header/separator pair.
///
/// Returns an empty vector when no header (a line containing both
/// `Issue ID` and `Title`) or no `+`-prefixed separator after it exists.
#[must_use]
pub fn parse_issues(text: &str) -> Vec<IssueRecord> {
    let lines: Vec<&str> = text.lines().collect();

    let Some(header_idx) = lines
        .iter()
        .position(|line| line.contains("Issue ID") && line.contains("Title"))
    else {
        return Vec::new();
    };
    let Some(separator_idx) = lines[header_idx + 1..]
        .iter()
        .position(|line| line.starts_with('+'))
        .map(|offset| header_idx + 1 + offset)
    else {
        return Vec::new();
    };

    let header = lines[header_idx];
    let offsets: [Option<usize>; 6] = COLUMNS.map(|title| header.find(title));
    let mut boundaries: Vec<usize> = offsets.iter().flatten().copied().collect();
    boundaries.sort_unstable();

    lines[separator_idx + 1..]
        .iter()
        .filter(|line| !line.trim().is_empty() && !line.starts_with('+'))
        .map(|line| {
            let [id, short_id, title, last_seen, status, level] =
                offsets.map(|start| start.map_or_else(String::new, |s| cell(line, s, &boundaries)));
            IssueRecord {
                id,
                short_id,
                title,
                last_seen,
                status,
                level,
            }
        })
        .collect()
}

/// Slice one cell out of `line`: from `start` to the next boundary after it
/// (or end of line), trimmed of whitespace and of one box-drawing `|` border
/// on each edge. A `|` inside the value is kept.
/// Offsets are clamped onto char boundaries so multi-byte titles never split a
/// character.
fn cell(line: &str, start: usize, boundaries: &[usize]) -> String {
    if start >= line.len() {
        return String::new();
    }
    let end = boundaries
        .iter()
        .copied()
        .find(|&b| b > start)
        .unwrap_or(line.len())
        .min(line.len());

    let start = floor_char_boundary(line, start);
    let end = floor_char_boundary(line, end);
    let raw = line[start..end].trim();
    let raw = raw.strip_prefix('|').unwrap_or(raw);
    let raw = raw.strip_suffix('|').unwrap_or(raw);
    raw.trim().to_string()
}

fn floor_char_boundary(s: &str, mut idx: usize) -> usize {
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

/// Coarse row count: non-blank lines that do not start with `Issue`.
///
/// Used for the "total issues" statistic, not for per-field parsing.
#[must_use]
pub fn count_data_rows(text: &str) -> usize {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("Issue"))
        .count()
}
