//! Markdown → XWiki pipeline.

use crate::common::lines::rewrite_runs;
use crate::common::normalize_newlines;
use crate::common::table;
use crate::common::wiki::{Callout, DEFAULT_CODE_LANGUAGE, TOC_PLACEHOLDER};
use crate::pipeline::{Pass, PassContext, Pipeline};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

pub const PIPELINE: Pipeline = Pipeline::new(
    "markdown-to-xwiki",
    &[
        Pass::new("normalize-newlines", normalize_newlines),
        Pass::new("fenced-code", fenced_code),
        Pass::new("inline-code", inline_code),
        Pass::new("headings", headings),
        Pass::new("horizontal-rules", horizontal_rules),
        Pass::new("callouts", callouts),
        Pass::new("emphasis", emphasis),
        Pass::new("images", images),
        Pass::new("links", links),
        Pass::new("lists", lists),
        Pass::new("tables", tables),
    ],
);

/// Convert a Markdown document to XWiki syntax.
pub fn convert(markdown: &str) -> String {
    PIPELINE.run(markdown, &mut PassContext::new())
}

static FENCED_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```([\w+#.-]+)?[^\n`]*\n(.*?)```").unwrap());
static INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`\n]+)`").unwrap());
static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(#{1,6}) (.*?)(?:[ \t]+#+)?[ \t]*$").unwrap());
static HORIZONTAL_RULE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(?:-{3,}|\*{3,}|_{3,})[ \t]*$").unwrap());
static CALLOUT_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^> ?\*\*(Info|Warning|Error):\*\* ?(.*)$").unwrap());
static TOC_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<!--\s*Table of Contents\s*-->").unwrap());
static BOLD_ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*\*(.+?)\*\*\*").unwrap());
static UNDERSCORE_BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"__(.+?)__").unwrap());
static STRIKETHROUGH: Lazy<Regex> = Lazy::new(|| Regex::new(r"~~(.+?)~~").unwrap());
static UNDERLINE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<u>(.*?)</u>").unwrap());
static SUPERSCRIPT_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<sup>(.*?)</sup>").unwrap());
static SUBSCRIPT_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<sub>(.*?)</sub>").unwrap());
static IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap());
static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());
static BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^([ \t]*)[-+] (.*)$").unwrap());
static ORDERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^([ \t]*)\d+\. (.*)$").unwrap());

fn fenced_code(text: &str, ctx: &mut PassContext<'_>) -> String {
    FENCED_CODE
        .replace_all(text, |caps: &Captures| {
            let language = caps.get(1).map_or(DEFAULT_CODE_LANGUAGE, |m| m.as_str());
            let body = trim_blank_lines(&caps[2]);
            ctx.stash.protect_block(format!(
                "{{{{code language=\"{language}\"}}}}\n{body}\n{{{{/code}}}}"
            ))
        })
        .into_owned()
}

/// Drop leading and trailing lines that hold only whitespace.
fn trim_blank_lines(body: &str) -> String {
    let lines: Vec<&str> = body.split('\n').collect();
    let Some(start) = lines.iter().position(|l| !l.trim().is_empty()) else {
        return String::new();
    };
    let end = lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .unwrap_or(start);
    lines[start..=end].join("\n")
}

// Captured before emphasis so `*` and `_` inside code stay literal.
fn inline_code(text: &str, ctx: &mut PassContext<'_>) -> String {
    INLINE_CODE
        .replace_all(text, |caps: &Captures| {
            ctx.stash.protect_inline(format!("##{}##", &caps[1]))
        })
        .into_owned()
}

fn headings(text: &str, _ctx: &mut PassContext<'_>) -> String {
    HEADING
        .replace_all(text, |caps: &Captures| {
            let marker = "=".repeat(caps[1].len());
            format!("{marker} {} {marker}", &caps[2])
        })
        .into_owned()
}

fn horizontal_rules(text: &str, _ctx: &mut PassContext<'_>) -> String {
    HORIZONTAL_RULE.replace_all(text, "----").into_owned()
}

/// `> **Info:** …` blockquotes written by the XWiki → Markdown direction turn back into
/// callout macros; the whole quote run becomes the macro body.
fn callouts(text: &str, _ctx: &mut PassContext<'_>) -> String {
    let text = rewrite_runs(
        text,
        |line| line.starts_with('>'),
        |run| {
            let Some(caps) = CALLOUT_LINE.captures(run[0]) else {
                return run.iter().map(|l| l.to_string()).collect();
            };
            let Some(callout) = Callout::from_label(&caps[1]) else {
                return run.iter().map(|l| l.to_string()).collect();
            };
            let mut body = vec![caps[2].to_string()];
            body.extend(run[1..].iter().map(|l| strip_quote(l).to_string()));
            let name = callout.macro_name();
            if body.len() == 1 {
                vec![format!("{{{{{name}}}}}{}{{{{/{name}}}}}", body[0])]
            } else {
                let mut lines = vec![format!("{{{{{name}}}}}")];
                lines.extend(body);
                lines.push(format!("{{{{/{name}}}}}"));
                lines
            }
        },
    );
    TOC_COMMENT.replace_all(&text, TOC_PLACEHOLDER).into_owned()
}

fn strip_quote(line: &str) -> &str {
    let rest = line.strip_prefix('>').unwrap_or(line);
    rest.strip_prefix(' ').unwrap_or(rest)
}

/// Longest markers first: `***` and `**` must be consumed before single `*` is looked at.
fn emphasis(text: &str, _ctx: &mut PassContext<'_>) -> String {
    let text = BOLD_ITALIC.replace_all(text, "**//$1//**");
    // `**bold**` is spelled the same in both dialects; `__bold__` is not, since XWiki
    // reads `__` as underline.
    let text = UNDERSCORE_BOLD.replace_all(&text, "**$1**");
    let text = rewrite_star_italics(&text);
    let text = STRIKETHROUGH.replace_all(&text, "--$1--");
    let text = UNDERLINE_TAG.replace_all(&text, "__${1}__");
    let text = SUPERSCRIPT_TAG.replace_all(&text, "^^$1^^");
    SUBSCRIPT_TAG.replace_all(&text, ",,$1,,").into_owned()
}

/// Rewrite `*x*` to `//x//`.
///
/// The opener may not touch another `*` or be followed by whitespace; the closer is the
/// next `*` on the same line and may not touch another `*` or follow whitespace. This keeps
/// bullet markers (`* item`) and the stars of `**bold**` out of italics.
fn rewrite_star_italics(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'*' && opens_italic(bytes, i) {
            if let Some(close) = find_italic_close(bytes, i + 1) {
                out.push_str(&text[copied..i]);
                out.push_str("//");
                out.push_str(&text[i + 1..close]);
                out.push_str("//");
                i = close + 1;
                copied = i;
                continue;
            }
        }
        i += 1;
    }
    out.push_str(&text[copied..]);
    out
}

fn opens_italic(bytes: &[u8], i: usize) -> bool {
    let after_star = i == 0 || bytes[i - 1] != b'*';
    match bytes.get(i + 1) {
        Some(next) => after_star && *next != b'*' && !next.is_ascii_whitespace(),
        None => false,
    }
}

fn find_italic_close(bytes: &[u8], start: usize) -> Option<usize> {
    for j in start..bytes.len() {
        match bytes[j] {
            b'\n' => return None,
            b'*' => {
                let closes = !bytes[j - 1].is_ascii_whitespace() && bytes.get(j + 1) != Some(&b'*');
                return closes.then_some(j);
            }
            _ => {}
        }
    }
    None
}

fn images(text: &str, _ctx: &mut PassContext<'_>) -> String {
    IMAGE.replace_all(text, "[[image:$2]]").into_owned()
}

fn links(text: &str, _ctx: &mut PassContext<'_>) -> String {
    LINK.replace_all(text, "[[$1>>$2]]").into_owned()
}

fn lists(text: &str, _ctx: &mut PassContext<'_>) -> String {
    let text = BULLET.replace_all(text, "$1* $2");
    ORDERED.replace_all(&text, "${1}1. $2").into_owned()
}

/// Separator rows have no XWiki equivalent and are removed with their line break, so the
/// table stays one contiguous run.
fn tables(text: &str, _ctx: &mut PassContext<'_>) -> String {
    text.split('\n')
        .filter(|line| !table::is_separator_row(line))
        .map(|line| match table::split_cells(line) {
            Some(cells) => format!("|{}|", cells.join("|")),
            None => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_map_to_marker_depth() {
        for level in 1..=6 {
            let md = format!("{} Title", "#".repeat(level));
            let marker = "=".repeat(level);
            assert_eq!(convert(&md), format!("{marker} Title {marker}"));
        }
        assert_eq!(convert("####### seven"), "####### seven");
        assert_eq!(convert("## Closed ##"), "== Closed ==");
    }

    #[test]
    fn fenced_code_becomes_code_macro() {
        let md = "```rust\n\nfn main() {}\n\n```\n";
        assert_eq!(
            convert(md),
            "{{code language=\"rust\"}}\nfn main() {}\n{{/code}}\n"
        );
        assert_eq!(
            convert("```\nx\n```"),
            "{{code language=\"none\"}}\nx\n{{/code}}"
        );
    }

    #[test]
    fn code_bodies_are_not_rewritten() {
        let md = "```js\n# not a heading\n- not a list\nlet a = b * c * d;\n```";
        let wiki = convert(md);
        assert!(wiki.contains("# not a heading"));
        assert!(wiki.contains("- not a list"));
        assert!(wiki.contains("b * c * d"));
        assert_eq!(convert("use `a*b*c` here"), "use ##a*b*c## here");
    }

    #[test]
    fn emphasis_longest_first() {
        assert_eq!(convert("***both***"), "**//both//**");
        assert_eq!(convert("**bold** and *it*"), "**bold** and //it//");
        assert_eq!(convert("__strong__"), "**strong**");
        assert_eq!(convert("a ~~gone~~ b"), "a --gone-- b");
        assert_eq!(convert("<u>u</u> <sup>2</sup> <sub>i</sub>"), "__u__ ^^2^^ ,,i,,");
    }

    #[test]
    fn italic_needs_flanking_stars() {
        assert_eq!(convert("* item with *stress*"), "* item with //stress//");
        assert_eq!(convert("2 * 3 * 4"), "2 * 3 * 4");
        assert_eq!(convert("*open\nclose*"), "*open\nclose*");
    }

    #[test]
    fn images_before_links() {
        assert_eq!(
            convert("![diagram](./img/a.png) see [docs](https://x.org)"),
            "[[image:./img/a.png]] see [[docs>>https://x.org]]"
        );
    }

    #[test]
    fn lists_keep_indentation() {
        let md = "- a\n  + b\n3. c\n   10. d";
        assert_eq!(convert(md), "* a\n  * b\n1. c\n   1. d");
    }

    #[test]
    fn table_separator_is_removed() {
        let md = "| A | B |\n|---|:-:|\n| 1 |  2 |\n";
        assert_eq!(convert(md), "|A|B|\n|1|2|\n");
    }

    #[test]
    fn rules_and_callouts() {
        assert_eq!(convert("---"), "----");
        assert_eq!(
            convert("> **Warning:** careful\n> really"),
            "{{warning}}\ncareful\nreally\n{{/warning}}"
        );
        assert_eq!(convert("> **Info:** note"), "{{info}}note{{/info}}");
        assert_eq!(convert("> just a quote"), "> just a quote");
        assert_eq!(convert("<!-- Table of Contents -->"), "{{toc/}}");
    }

    #[test]
    fn trims_blank_lines_only() {
        assert_eq!(trim_blank_lines("\n  \n    indented\n\n"), "    indented");
        assert_eq!(trim_blank_lines("\n\n"), "");
    }
}
