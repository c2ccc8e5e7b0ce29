//! Table of contents built from rendered headings.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"<h([1-6])>(.*?)</h[1-6]>").unwrap());
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

pub const TOC_TITLE: &str = "📋 Table of Contents";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub level: u8,
    pub text: String,
}

/// Headings of a rendered fragment, in document order. Inline markup is dropped from the
/// entry text.
pub fn extract_entries(html: &str) -> Vec<TocEntry> {
    HEADING
        .captures_iter(html)
        .filter_map(|caps| {
            let level = caps[1].parse().ok()?;
            let text = TAG.replace_all(&caps[2], "").trim().to_string();
            Some(TocEntry { level, text })
        })
        .collect()
}

/// The outline block: one line per entry, indented two spaces per level below the first.
pub fn render_outline(entries: &[TocEntry]) -> String {
    let items: Vec<String> = entries
        .iter()
        .map(|entry| {
            let indent = "  ".repeat(usize::from(entry.level.saturating_sub(1)));
            format!("{indent}• {}", entry.text)
        })
        .collect();
    format!("<div class=\"toc\">{TOC_TITLE}\n{}</div>", items.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_strip_inline_markup() {
        let html = "<h1>Intro</h1>\n<p>x</p>\n<h2>The <strong>core</strong> idea</h2>";
        assert_eq!(
            extract_entries(html),
            vec![
                TocEntry { level: 1, text: "Intro".into() },
                TocEntry { level: 2, text: "The core idea".into() },
            ]
        );
    }

    #[test]
    fn outline_indents_by_depth() {
        let entries = [
            TocEntry { level: 1, text: "A".into() },
            TocEntry { level: 2, text: "B".into() },
            TocEntry { level: 1, text: "C".into() },
        ];
        assert_eq!(
            render_outline(&entries),
            "<div class=\"toc\">📋 Table of Contents\n• A\n  • B\n• C</div>"
        );
    }

    #[test]
    fn empty_outline_keeps_title() {
        assert_eq!(
            render_outline(&[]),
            "<div class=\"toc\">📋 Table of Contents\n</div>"
        );
    }
}
