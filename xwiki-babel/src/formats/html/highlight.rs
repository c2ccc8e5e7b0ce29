//! Inline lexical highlighting for JavaScript code blocks.
//!
//! Five rules run in a fixed order over the already escaped code: keywords, call-site
//! function names, string literals, line comments, integers. Each match is wrapped in a
//! `<span class="token KIND">`.
//!
//! Every rule matches against a masked copy of the code in which the markup inserted by
//! earlier rules is blanked out, so a rule never matches inside a tag. Source tokens are
//! not protected: a keyword inside a string literal is tagged as a keyword and then wrapped
//! again by the string rule.

use once_cell::sync::Lazy;
use regex::Regex;

/// Language tag that turns the highlighter on.
pub const HIGHLIGHTED_LANGUAGE: &str = "javascript";

struct Rule {
    class: &'static str,
    pattern: Regex,
    /// Capture group that is wrapped; the rest of the match is kept as is.
    group: usize,
}

static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    let rule = |class, pattern: &str, group| Rule {
        class,
        pattern: Regex::new(pattern).unwrap(),
        group,
    };
    vec![
        rule(
            "keyword",
            r"\b(function|return|const|let|var|if|else|for|while)\b",
            0,
        ),
        rule("function", r"\b([a-zA-Z_$][a-zA-Z0-9_$]*)\s*\(", 1),
        rule("string", r#""[^'"`]*"|'[^'"`]*'|`[^'"`]*`"#, 0),
        rule("comment", r"(?m)//.*$", 0),
        rule("number", r"\b\d+\b", 0),
    ]
});

// Stands in for inserted markup in the masked copy; matched by no rule.
const MASK: char = '\0';

/// Highlight escaped JavaScript source.
pub fn highlight(code: &str) -> String {
    let mut code = code.to_string();
    let mut masked = code.clone();
    for rule in RULES.iter() {
        (code, masked) = apply(rule, &code, &masked);
    }
    code
}

// `code` and `masked` have equal length and differ only inside inserted markup, which is
// ASCII in both, so byte offsets found in `masked` are valid in `code`.
fn apply(rule: &Rule, code: &str, masked: &str) -> (String, String) {
    let open = format!("<span class=\"token {}\">", rule.class);
    let close = "</span>";
    let mut out = String::with_capacity(code.len());
    let mut out_masked = String::with_capacity(masked.len());
    let mut last = 0;
    for caps in rule.pattern.captures_iter(masked) {
        let Some(m) = caps.get(rule.group) else {
            continue;
        };
        out.push_str(&code[last..m.start()]);
        out_masked.push_str(&masked[last..m.start()]);

        out.push_str(&open);
        out.push_str(&code[m.range()]);
        out.push_str(close);

        out_masked.extend(std::iter::repeat(MASK).take(open.len()));
        out_masked.push_str(&masked[m.range()]);
        out_masked.extend(std::iter::repeat(MASK).take(close.len()));
        last = m.end();
    }
    out.push_str(&code[last..]);
    out_masked.push_str(&masked[last..]);
    (out, out_masked)
}
