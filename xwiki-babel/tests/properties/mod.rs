//! Property tests for the three pipelines.

use crate::common::{count, has_stash_tokens};
use proptest::prelude::*;
use xwiki_babel::formats::html::toc::extract_entries;
use xwiki_babel::{
    markdown_to_xwiki, resolve_image_path, xwiki_to_html, xwiki_to_markdown, LocationHint,
};

fn word() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

fn line() -> impl Strategy<Value = String> {
    prop::collection::vec(word(), 1..6).prop_map(|words| words.join(" "))
}

/// Blocks of plain lines; blocks are separated by blank lines.
fn plain_blocks() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::collection::vec(line(), 1..4).prop_map(|lines| lines.join("\n")),
        1..6,
    )
}

/// Text drawn from the characters both dialects give meaning to.
fn markup_soup() -> impl Strategy<Value = String> {
    r"[-*#=|>/\\\[\]{}()%:;,^_~`!.1 a-z\n]{0,200}"
}

proptest! {
    #[test]
    fn plain_blocks_become_one_paragraph_each(blocks in plain_blocks()) {
        let html = xwiki_to_html(&blocks.join("\n\n"), None);
        let expected: Vec<String> = blocks.iter().map(|b| format!("<p>{b}</p>")).collect();
        prop_assert_eq!(&html, &expected.join("\n"));
        prop_assert_eq!(count(&html, "<p>"), blocks.len());
        prop_assert!(!html.contains("<p><p>"));
    }

    #[test]
    fn heading_depth_survives_both_directions(level in 1usize..=6, title in "[A-Za-z][A-Za-z ]{0,20}[A-Za-z]") {
        let md = format!("{} {title}", "#".repeat(level));
        let wiki = markdown_to_xwiki(&md);
        let marker = "=".repeat(level);
        prop_assert_eq!(&wiki, &format!("{marker} {title} {marker}"));
        prop_assert_eq!(xwiki_to_markdown(&wiki), md);
    }

    #[test]
    fn round_trip_keeps_headings_and_list_order(
        headings in prop::collection::vec((1usize..=6, word()), 1..6),
        items in prop::collection::vec((any::<bool>(), 1u8..100, word()), 1..8),
    ) {
        let mut lines: Vec<String> = headings
            .iter()
            .map(|(level, text)| format!("{} {text}", "#".repeat(*level)))
            .collect();
        for (ordered, number, text) in &items {
            if *ordered {
                lines.push(format!("{number}. {text}"));
            } else {
                lines.push(format!("- {text}"));
            }
        }
        let md = lines.join("\n\n");
        let back = xwiki_to_markdown(&markdown_to_xwiki(&md));

        let heading_lines: Vec<&str> = back.lines().filter(|l| l.starts_with('#')).collect();
        let expected_headings: Vec<&str> = lines[..headings.len()].iter().map(String::as_str).collect();
        prop_assert_eq!(heading_lines, expected_headings);

        let item_texts: Vec<&str> = back
            .lines()
            .filter_map(|l| l.strip_prefix("- ").or_else(|| l.strip_prefix("1. ")))
            .collect();
        let expected_items: Vec<&str> = items.iter().map(|(_, _, text)| text.as_str()).collect();
        prop_assert_eq!(item_texts, expected_items);
    }

    #[test]
    fn pipelines_never_panic(text in ".{0,300}") {
        let _ = markdown_to_xwiki(&text);
        let _ = xwiki_to_markdown(&text);
        let _ = xwiki_to_html(&text, Some(&LocationHint::new("/tmp/page.xwiki")));
    }

    #[test]
    fn protected_spans_are_always_restored(text in markup_soup()) {
        prop_assert!(!has_stash_tokens(&markdown_to_xwiki(&text)));
        prop_assert!(!has_stash_tokens(&xwiki_to_markdown(&text)));
        prop_assert!(!has_stash_tokens(&xwiki_to_html(&text, None)));
    }

    #[test]
    fn nested_lists_are_balanced(depths in prop::collection::vec(0usize..4, 1..12)) {
        // Each item is at most one level deeper than the one before it.
        let mut level = 0;
        let mut lines = Vec::new();
        for (i, depth) in depths.iter().enumerate() {
            level = (*depth).min(level + 1);
            lines.push(format!("{}* item{i}", "  ".repeat(level)));
        }
        let html = xwiki_to_html(&lines.join("\n"), None);
        prop_assert_eq!(count(&html, "<ul>"), count(&html, "</ul>"));
        prop_assert_eq!(count(&html, "<li>"), depths.len());
        prop_assert_eq!(count(&html, "</li>"), depths.len());
    }
}

#[test]
fn alternating_indentation_opens_one_nested_list() {
    let html = xwiki_to_html("* a\n  * b\n* c", None);
    assert_eq!(
        html,
        "<ul>\n<li>a\n<ul>\n<li>b</li>\n</ul>\n</li>\n<li>c</li>\n</ul>"
    );
    assert_eq!(count(&html, "<ul>"), 2);
    assert_eq!(count(&html, "</ul>"), 2);
}

#[test]
fn table_round_trip_synthesizes_separator() {
    let md = "| A | B | C |\n|---|---|---|\n| 1 | 2 | 3 |";
    let wiki = markdown_to_xwiki(md);
    assert_eq!(wiki, "|A|B|C|\n|1|2|3|");

    let back = xwiki_to_markdown(&wiki);
    assert_eq!(back, "|A|B|C|\n|----|----|----|\n|1|2|3|");
    assert_eq!(back.lines().count(), 3);
}

#[test]
fn toc_indents_only_the_nested_heading() {
    let html = xwiki_to_html("{{toc/}}\n\n= One =\n\n== Two ==\n\n= Three =", None);
    let outline: Vec<&str> = html
        .lines()
        .skip_while(|l| !l.starts_with("<div class=\"toc\">"))
        .skip(1)
        .take(3)
        .collect();
    assert_eq!(outline, vec!["• One", "  • Two", "• Three</div>"]);

    let levels: Vec<u8> = extract_entries(&html).iter().map(|e| e.level).collect();
    assert_eq!(levels, vec![1, 2, 1]);
}

#[test]
fn image_paths_resolve_against_the_document() {
    let hint = LocationHint::new("/home/me/docs/page.xwiki");
    assert_eq!(
        resolve_image_path("./img/a.png", Some(&hint)),
        "file:///home/me/docs/img/a.png"
    );
    assert_eq!(
        resolve_image_path("https://x/y.png", Some(&hint)),
        "https://x/y.png"
    );
}
