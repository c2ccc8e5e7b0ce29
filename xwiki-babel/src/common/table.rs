//! Pipe-delimited table rows.
//!
//! Both dialects write a row as `|cell|cell|`. XWiki marks header cells with a leading `=`
//! (`|=Name|=Size|`); Markdown instead uses a separator row (`|---|:--:|`) under the header.

/// One parsed cell, trimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell<'a> {
    pub text: &'a str,
    pub header: bool,
}

/// Trimmed cells of a row, without header interpretation.
pub fn split_cells(line: &str) -> Option<Vec<&str>> {
    let inner = row_inner(line)?;
    Some(inner.split('|').map(str::trim).collect())
}

/// Parse an XWiki table row. Returns `None` when the line is not a row.
pub fn parse_row(line: &str) -> Option<Vec<Cell<'_>>> {
    Some(
        split_cells(line)?
            .into_iter()
            .map(|text| {
                match text.strip_prefix('=') {
                    Some(header) => Cell {
                        text: header.trim_start(),
                        header: true,
                    },
                    None => Cell {
                        text,
                        header: false,
                    },
                }
            })
            .collect(),
    )
}

pub fn is_row(line: &str) -> bool {
    row_inner(line).is_some()
}

/// A Markdown header separator row: only pipes, dashes, colons and spaces, with at least
/// one dash.
pub fn is_separator_row(line: &str) -> bool {
    match row_inner(line) {
        Some(inner) => {
            inner.contains('-') && inner.chars().all(|c| matches!(c, '-' | ':' | '|' | ' ' | '\t'))
        }
        None => false,
    }
}

/// Markdown separator row for a row of `columns` cells.
pub fn separator_row(columns: usize) -> String {
    let mut row = String::from("|");
    for _ in 0..columns {
        row.push_str("----|");
    }
    row
}

fn row_inner(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.len() < 3 {
        return None;
    }
    trimmed.strip_prefix('|')?.strip_suffix('|')
}
