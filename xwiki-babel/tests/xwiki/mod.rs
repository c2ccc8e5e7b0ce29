//! Markdown → XWiki conversion tests.

use crate::common::fixture;
use insta::assert_snapshot;
use xwiki_babel::formats::xwiki::from_markdown::PIPELINE;
use xwiki_babel::pipeline::RESTORE_PASS;
use xwiki_babel::{markdown_to_xwiki, FormatRegistry, PassContext};

#[test]
fn converts_guide_fixture() {
    assert_eq!(
        markdown_to_xwiki(&fixture("guide.md")),
        fixture("guide.xwiki")
    );
}

#[test]
fn registry_matches_direct_call() {
    let registry = FormatRegistry::default();
    let source = fixture("guide.md");
    assert_eq!(
        registry.convert(&source, "markdown", "xwiki").unwrap(),
        markdown_to_xwiki(&source)
    );
}

#[test]
fn windows_line_endings() {
    assert_eq!(
        markdown_to_xwiki("# A\r\n\r\n- b\r\n"),
        "= A =\n\n* b\n"
    );
}

#[test]
fn code_keeps_markdown_literal() {
    let md = "```\n# not a heading\n**not bold** and ~~kept~~\n```\n\nafter `**x**`";
    assert_snapshot!(markdown_to_xwiki(md), @r#"
    {{code language="none"}}
    # not a heading
    **not bold** and ~~kept~~
    {{/code}}

    after ##**x**##
    "#);
}

#[test]
fn multi_line_callout() {
    let md = "> **Error:** Build failed\n> see the log\n\nnext";
    assert_eq!(
        markdown_to_xwiki(md),
        "{{error}}\nBuild failed\nsee the log\n{{/error}}\n\nnext"
    );
}

#[test]
fn trace_ends_with_restored_output() {
    let source = fixture("guide.md");
    let traces = PIPELINE.trace(&source, &mut PassContext::new());
    assert_eq!(traces.len(), PIPELINE.pass_names().len() + 1);
    assert_eq!(traces[0].pass, "normalize-newlines");

    let last = traces.last().unwrap();
    assert_eq!(last.pass, RESTORE_PASS);
    assert_eq!(last.output, PIPELINE.run(&source, &mut PassContext::new()));
}
