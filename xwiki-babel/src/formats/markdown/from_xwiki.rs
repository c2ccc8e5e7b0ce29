//! XWiki → Markdown pipeline.

use crate::common::normalize_newlines;
use crate::common::table;
use crate::common::wiki::{self, Callout, TOC_PLACEHOLDER};
use crate::pipeline::{Pass, PassContext, Pipeline};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

pub const PIPELINE: Pipeline = Pipeline::new(
    "xwiki-to-markdown",
    &[
        Pass::new("normalize-newlines", normalize_newlines),
        Pass::new("code-macro", code_macro),
        Pass::new("callouts", callouts),
        Pass::new("toc", toc),
        Pass::new("monospace", monospace),
        Pass::new("headings", headings),
        Pass::new("emphasis", emphasis),
        Pass::new("styled-spans", styled_spans),
        Pass::new("links", links),
        Pass::new("images", images),
        Pass::new("definitions", definitions),
        Pass::new("line-breaks", line_breaks),
        Pass::new("tables", tables),
        Pass::new("horizontal-rules", horizontal_rules),
        Pass::new("lists", lists),
    ],
);

/// Convert an XWiki document to Markdown.
pub fn convert(xwiki: &str) -> String {
    PIPELINE.run(xwiki, &mut PassContext::new())
}

pub const TOC_COMMENT: &str = "<!-- Table of Contents -->";

static BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^([ \t]*)\* (.*)$").unwrap());

fn code_macro(text: &str, ctx: &mut PassContext<'_>) -> String {
    wiki::CODE_MACRO
        .replace_all(text, |caps: &Captures| {
            let language = wiki::code_language(caps.get(1).map(|m| m.as_str())).unwrap_or("");
            let body = wiki::code_body(&caps[2]);
            ctx.stash
                .protect_block(format!("```{language}\n{body}\n```"))
        })
        .into_owned()
}

/// Each callout becomes a blockquote whose first line carries the bold label.
fn callouts(text: &str, _ctx: &mut PassContext<'_>) -> String {
    let mut text = text.to_string();
    for callout in Callout::ALL {
        text = callout
            .pattern()
            .replace_all(&text, |caps: &Captures| {
                let body = wiki::code_body(&caps[1]);
                let quoted: Vec<String> = body
                    .split('\n')
                    .enumerate()
                    .map(|(i, line)| {
                        if i == 0 {
                            format!("> **{}:** {line}", callout.label())
                        } else {
                            format!("> {line}")
                        }
                    })
                    .collect();
                quoted.join("\n")
            })
            .into_owned();
    }
    text
}

// The comment is protected: its dashes would otherwise feed the strikethrough rule.
fn toc(text: &str, ctx: &mut PassContext<'_>) -> String {
    if !text.contains(TOC_PLACEHOLDER) {
        return text.to_string();
    }
    let token = ctx.stash.protect_inline(TOC_COMMENT);
    text.replace(TOC_PLACEHOLDER, &token)
}

fn monospace(text: &str, ctx: &mut PassContext<'_>) -> String {
    let mut to_backticks = |caps: &Captures| ctx.stash.protect_inline(format!("`{}`", &caps[1]));
    let text = wiki::MONOSPACE.replace_all(text, &mut to_backticks);
    wiki::INLINE_CODE
        .replace_all(&text, &mut to_backticks)
        .into_owned()
}

fn headings(text: &str, _ctx: &mut PassContext<'_>) -> String {
    let mut text = text.to_string();
    for (level, pattern) in wiki::HEADINGS.iter() {
        let marker = "#".repeat(*level);
        text = pattern
            .replace_all(&text, format!("{marker} $1").as_str())
            .into_owned();
    }
    text
}

fn emphasis(text: &str, _ctx: &mut PassContext<'_>) -> String {
    let text = wiki::BOLD_ITALIC.replace_all(text, "***$1***");
    // Bold is spelled the same in both dialects.
    let text = wiki::ITALIC.replace_all(&text, "$1*$2*");
    let text = wiki::STRIKETHROUGH.replace_all(&text, "~~$1~~");
    let text = wiki::UNDERLINE.replace_all(&text, "<u>$1</u>");
    let text = wiki::SUPERSCRIPT.replace_all(&text, "<sup>$1</sup>");
    wiki::SUBSCRIPT
        .replace_all(&text, "<sub>$1</sub>")
        .into_owned()
}

fn styled_spans(text: &str, _ctx: &mut PassContext<'_>) -> String {
    wiki::STYLED_SPAN
        .replace_all(text, r#"<span style="$1">$2</span>"#)
        .into_owned()
}

fn links(text: &str, _ctx: &mut PassContext<'_>) -> String {
    wiki::LINK.replace_all(text, "[$1]($2)").into_owned()
}

fn images(text: &str, _ctx: &mut PassContext<'_>) -> String {
    let text = wiki::IMAGE_WITH_ALT.replace_all(text, "![$2]($1)");
    wiki::IMAGE.replace_all(&text, "![Image]($1)").into_owned()
}

fn definitions(text: &str, _ctx: &mut PassContext<'_>) -> String {
    wiki::DEFINITION
        .replace_all(text, |caps: &Captures| {
            format!("**{}**: {}", caps[1].trim(), caps[2].trim_start())
        })
        .into_owned()
}

fn line_breaks(text: &str, _ctx: &mut PassContext<'_>) -> String {
    wiki::LINE_BREAK.replace_all(text, "  ").into_owned()
}

/// Markdown tables need a separator row under their header; XWiki has none. The first row
/// of every table is taken as the header.
fn tables(text: &str, _ctx: &mut PassContext<'_>) -> String {
    let mut scanner = TableScanner::default();
    let mut out = Vec::new();
    for line in text.split('\n') {
        scanner.push(line, &mut out);
    }
    out.join("\n")
}

#[derive(Debug, Default)]
struct TableScanner {
    in_table: bool,
}

impl TableScanner {
    fn push(&mut self, line: &str, out: &mut Vec<String>) {
        match table::parse_row(line) {
            Some(cells) => {
                let row: Vec<&str> = cells.iter().map(|c| c.text).collect();
                out.push(format!("|{}|", row.join("|")));
                if !self.in_table {
                    self.in_table = true;
                    out.push(table::separator_row(cells.len()));
                }
            }
            None => {
                self.in_table = false;
                out.push(line.to_string());
            }
        }
    }
}

// Runs after the table pass so that a rule is never read as a separator row.
fn horizontal_rules(text: &str, _ctx: &mut PassContext<'_>) -> String {
    wiki::HORIZONTAL_RULE.replace_all(text, "---").into_owned()
}

/// `1.` is already valid Markdown; renderers renumber the items.
fn lists(text: &str, _ctx: &mut PassContext<'_>) -> String {
    BULLET.replace_all(text, "$1- $2").into_owned()
}
