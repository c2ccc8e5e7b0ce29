//! XWiki → HTML rendering tests.

use crate::common::{count, fixture};
use insta::assert_snapshot;
use std::collections::HashMap;
use xwiki_babel::formats::html::renderer::PIPELINE;
use xwiki_babel::pipeline::RESTORE_PASS;
use xwiki_babel::{xwiki_to_html, FormatError, FormatRegistry, LocationHint, PassContext};

fn guide_hint() -> LocationHint {
    LocationHint::new("/home/me/docs/guide.xwiki")
}

fn options(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn renders_guide_fixture() {
    let html = xwiki_to_html(&fixture("guide.xwiki"), Some(&guide_hint()));
    assert_eq!(html, fixture("guide.html").trim_end());
}

#[test]
fn standalone_page_through_registry() {
    let registry = FormatRegistry::default();
    let page = registry
        .convert_with_options(
            "= Hello =",
            "xwiki",
            "html",
            &options(&[("standalone", "true"), ("title", "Guide")]),
        )
        .unwrap();
    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.contains("<title>Guide</title>"));
    assert!(page.contains("<body>\n<h1>Hello</h1>\n</body>"));

    let fragment = registry.convert("= Hello =", "xwiki", "html").unwrap();
    assert_eq!(fragment, "<h1>Hello</h1>");
}

#[test]
fn resource_base_rewrites_images_and_policy() {
    let registry = FormatRegistry::default();
    let page = registry
        .convert_with_options(
            "[[image:img/logo.png]]",
            "xwiki",
            "html",
            &options(&[
                ("document", "/home/me/docs/guide.xwiki"),
                ("resource-base", "https://file.preview.local/"),
                ("standalone", "true"),
            ]),
        )
        .unwrap();
    assert!(page.contains(
        "<img src=\"https://file.preview.local/home/me/docs/img/logo.png\" alt=\"Image\" />"
    ));
    assert!(page.contains("https://file.preview.local"));
}

#[test]
fn bad_options_are_reported() {
    let registry = FormatRegistry::default();
    let err = registry
        .convert_with_options("x", "xwiki", "html", &options(&[("standalone", "maybe")]))
        .unwrap_err();
    assert_eq!(
        err,
        FormatError::InvalidOption {
            key: "standalone".to_string(),
            value: "maybe".to_string(),
        }
    );
    let err = registry.convert("x", "markdown", "html").unwrap_err();
    assert!(matches!(err, FormatError::NotSupported { .. }));
}

#[test]
fn structure_inside_code_is_not_rendered() {
    let html = xwiki_to_html(
        "{{code language=\"none\"}}\n= not a heading =\n----\n* not a list\n{{/code}}",
        None,
    );
    assert_snapshot!(html, @r#"
    <pre><code class="language-none">= not a heading =
    ----
    * not a list</code></pre>
    "#);
}

#[test]
fn highlighted_javascript_keeps_markup_intact() {
    let html = xwiki_to_html(
        "{{code language=\"javascript\"}}const s = \"<hi>\";{{/code}}",
        None,
    );
    assert_eq!(
        html,
        "<pre><code class=\"language-javascript\"><span class=\"token keyword\">const</span> s = <span class=\"token string\">\"&lt;hi&gt;\"</span>;</code></pre>"
    );
}

#[test]
fn toc_placeholders_all_expand() {
    let html = xwiki_to_html("{{toc/}}\n\n= A =\n\n{{toc/}}", None);
    assert_eq!(count(&html, "<div class=\"toc\">"), 2);
    assert!(!html.contains("{{toc/}}"));
}

#[test]
fn separate_tables_and_definition_lists() {
    let html = xwiki_to_html("|a|\n\ntext\n\n|b|\n\n;x:1\n\n;y:2", None);
    assert_eq!(count(&html, "<table>"), 2);
    assert_eq!(count(&html, "</table>"), 2);
    assert_eq!(count(&html, "<dl>"), 2);
    assert_eq!(count(&html, "<p>text</p>"), 1);
}

#[test]
fn no_paragraph_inside_blocks() {
    let html = xwiki_to_html("{{info}}\nfirst\n\nsecond\n{{/info}}\n\nafter", None);
    assert_eq!(
        html,
        "<div class=\"info-box\">ℹ️ first\n\nsecond</div>\n<p>after</p>"
    );
}

#[test]
fn inline_raw_tag_keeps_later_paragraphs() {
    let html = xwiki_to_html(
        "Wrap code in a <pre> element.\n\nSecond paragraph.\n\nThird.",
        None,
    );
    assert_eq!(
        html,
        "<p>Wrap code in a <pre> element.</p>\n<p>Second paragraph.</p>\n<p>Third.</p>"
    );
}

#[test]
fn trace_ends_with_restored_output() {
    let hint = guide_hint();
    let source = fixture("guide.xwiki");
    let traces = PIPELINE.trace(&source, &mut PassContext::with_location(Some(&hint)));
    let last = traces.last().unwrap();
    assert_eq!(last.pass, RESTORE_PASS);
    assert_eq!(last.output, fixture("guide.html").trim_end());
    // Protected spans stay hidden until the end.
    let code = traces.iter().find(|t| t.pass == "code-macro").unwrap();
    assert!(!code.output.contains("<pre>"));
}
