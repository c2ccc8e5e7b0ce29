//! XWiki → Markdown conversion tests.

use crate::common::fixture;
use xwiki_babel::{markdown_to_xwiki, xwiki_to_markdown, FormatRegistry};

#[test]
fn converts_guide_fixture() {
    assert_eq!(
        xwiki_to_markdown(&fixture("guide.xwiki")),
        fixture("guide.roundtrip.md")
    );
}

#[test]
fn markdown_round_trip_keeps_shape() {
    let once = xwiki_to_markdown(&markdown_to_xwiki(&fixture("guide.md")));
    assert_eq!(once, fixture("guide.roundtrip.md"));
    // A second trip changes nothing.
    assert_eq!(xwiki_to_markdown(&markdown_to_xwiki(&once)), once);
}

#[test]
fn inline_constructs() {
    assert_eq!(
        xwiki_to_markdown("**//both//** //it// --gone-- __u__ ^^2^^ ,,i,,"),
        "***both*** *it* ~~gone~~ <u>u</u> <sup>2</sup> <sub>i</sub>"
    );
    assert_eq!(
        xwiki_to_markdown("(% style=\"color:red\" %)hot(%%)"),
        "<span style=\"color:red\">hot</span>"
    );
}

#[test]
fn urls_are_not_italic() {
    assert_eq!(
        xwiki_to_markdown("[[Site>>https://example.org//path]]"),
        "[Site](https://example.org//path)"
    );
}

#[test]
fn images_links_and_definitions() {
    assert_eq!(
        xwiki_to_markdown("[[image:a.png||alt=\"Chart\"]] [[image:b.png]]"),
        "![Chart](a.png) ![Image](b.png)"
    );
    assert_eq!(xwiki_to_markdown(";Term: meaning"), "**Term**: meaning");
    assert_eq!(xwiki_to_markdown("first\\\\\nsecond"), "first  \nsecond");
}

#[test]
fn callouts_become_labelled_quotes() {
    assert_eq!(
        xwiki_to_markdown("{{info}}\nline one\nline two\n{{/info}}"),
        "> **Info:** line one\n> line two"
    );
}

#[test]
fn toc_placeholder_survives_as_comment() {
    let md = xwiki_to_markdown("{{toc/}}\n\n= A =");
    assert_eq!(md, "<!-- Table of Contents -->\n\n# A");
    assert_eq!(markdown_to_xwiki(&md), "{{toc/}}\n\n= A =");
}

#[test]
fn identity_conversion_returns_source() {
    let registry = FormatRegistry::default();
    assert_eq!(
        registry.convert("= Same =", "xwiki", "xwiki").unwrap(),
        "= Same ="
    );
}
