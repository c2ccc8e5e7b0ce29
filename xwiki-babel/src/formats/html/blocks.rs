//! Block grouping passes: blockquotes, tables, definition lists and paragraphs.

use crate::common::lines::rewrite_runs;
use crate::common::protect::Stash;
use crate::common::table;
use once_cell::sync::Lazy;
use regex::Regex;

static BLOCK_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<(/?)(?:h[1-6]|table|div|blockquote|dl|pre|ul|ol)\b[^>]*>").unwrap()
});

fn quote_line(line: &str) -> Option<&str> {
    if line == ">" {
        return Some("");
    }
    line.strip_prefix("> ")
}

/// Merge each run of `> ` lines into one `<blockquote>`, lines joined by `<br>`.
pub fn blockquotes(text: &str) -> String {
    rewrite_runs(
        text,
        |line| quote_line(line).is_some(),
        |run| {
            let lines: Vec<&str> = run.iter().filter_map(|line| quote_line(line)).collect();
            vec![format!("<blockquote>{}</blockquote>", lines.join("<br>"))]
        },
    )
}

/// Wrap each run of table rows in a `<table>`; `|=` cells become `<th>`.
pub fn tables(text: &str) -> String {
    rewrite_runs(text, table::is_row, |run| {
        let mut out = Vec::with_capacity(run.len() + 2);
        out.push("<table>".to_string());
        for row in run {
            let cells: String = table::parse_row(row)
                .unwrap_or_default()
                .into_iter()
                .map(|cell| {
                    let tag = if cell.header { "th" } else { "td" };
                    format!("<{tag}>{}</{tag}>", cell.text)
                })
                .collect();
            out.push(format!("<tr>{cells}</tr>"));
        }
        out.push("</table>".to_string());
        out
    })
}

/// Wrap each run of `<dt>` lines in a `<dl>`.
pub fn definition_lists(text: &str) -> String {
    rewrite_runs(
        text,
        |line| line.starts_with("<dt>"),
        |run| {
            let mut out = Vec::with_capacity(run.len() + 2);
            out.push("<dl>".to_string());
            out.extend(run.iter().map(|line| line.to_string()));
            out.push("</dl>".to_string());
            out
        },
    )
}

/// Paragraph wrapping.
///
/// Tracks how deep the scan is inside block elements. A line is a block line when it is
/// inside a block, starts with a block tag, is a rule or holds a protected block. Tags in
/// the middle of prose do not open a block. Runs of other lines between blank lines become
/// one `<p>`. Blank lines are dropped outside blocks.
#[derive(Debug, Default)]
pub struct ParagraphScanner {
    depth: usize,
    paragraph: Vec<String>,
    out: Vec<String>,
}

impl ParagraphScanner {
    pub fn push(&mut self, line: &str) {
        if self.depth == 0 && line.trim().is_empty() {
            self.flush();
            return;
        }
        if self.depth > 0 || is_block_line(line) {
            self.flush();
            self.depth = depth_after(self.depth, line);
            self.out.push(line.to_string());
            return;
        }
        self.paragraph.push(line.to_string());
    }

    pub fn finish(mut self) -> Vec<String> {
        self.flush();
        self.out
    }

    fn flush(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }
        self.out
            .push(format!("<p>{}</p>", self.paragraph.join("\n")));
        self.paragraph.clear();
    }
}

fn is_block_line(line: &str) -> bool {
    starts_with_block_tag(line) || line.trim() == "<hr>" || Stash::contains_block_token(line)
}

fn starts_with_block_tag(line: &str) -> bool {
    BLOCK_TAG
        .find(line)
        .is_some_and(|m| line[..m.start()].trim().is_empty())
}

fn depth_after(depth: usize, line: &str) -> usize {
    BLOCK_TAG.captures_iter(line).fold(depth, |depth, caps| {
        if caps[1].is_empty() {
            depth + 1
        } else {
            depth.saturating_sub(1)
        }
    })
}

pub fn paragraphs(text: &str) -> String {
    let mut scanner = ParagraphScanner::default();
    for line in text.split('\n') {
        scanner.push(line);
    }
    scanner.finish().join("\n")
}
