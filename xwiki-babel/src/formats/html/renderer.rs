//! XWiki → HTML fragment pipeline.

use super::blocks;
use super::highlight::{highlight, HIGHLIGHTED_LANGUAGE};
use super::images::{resolve_image_path, LocationHint};
use super::lists::render_lists;
use super::toc::{extract_entries, render_outline};
use crate::common::normalize_newlines;
use crate::common::wiki::{self, Callout, DEFAULT_CODE_LANGUAGE, TOC_PLACEHOLDER};
use crate::pipeline::{Pass, PassContext, Pipeline};
use html_escape::{encode_double_quoted_attribute, encode_text};
use regex::Captures;

pub const PIPELINE: Pipeline = Pipeline::new(
    "xwiki-to-html",
    &[
        Pass::new("normalize-newlines", normalize_newlines),
        Pass::new("code-macro", code_macro),
        Pass::new("monospace", monospace),
        Pass::new("horizontal-rules", horizontal_rules),
        Pass::new("headings", headings),
        Pass::new("callouts", callouts),
        Pass::new("emphasis", emphasis),
        Pass::new("styled-spans", styled_spans),
        Pass::new("images", images),
        Pass::new("links", links),
        Pass::new("blockquotes", blockquotes),
        Pass::new("definitions", definitions),
        Pass::new("toc", toc),
        Pass::new("line-breaks", line_breaks),
        Pass::new("lists", lists),
        Pass::new("tables", tables),
        Pass::new("paragraphs", paragraphs),
    ],
);

/// Render an XWiki document to an HTML fragment.
///
/// `location` is only used to resolve image paths.
pub fn render(xwiki: &str, location: Option<&LocationHint>) -> String {
    PIPELINE.run(xwiki, &mut PassContext::with_location(location))
}

fn code_macro(text: &str, ctx: &mut PassContext<'_>) -> String {
    wiki::CODE_MACRO
        .replace_all(text, |caps: &Captures| {
            let language = caps.get(1).map_or(DEFAULT_CODE_LANGUAGE, |m| m.as_str());
            let escaped = encode_text(wiki::code_body(&caps[2]));
            let body = if language == HIGHLIGHTED_LANGUAGE {
                highlight(&escaped)
            } else {
                escaped.into_owned()
            };
            ctx.stash.protect_block(format!(
                "<pre><code class=\"language-{}\">{body}</code></pre>",
                encode_double_quoted_attribute(language)
            ))
        })
        .into_owned()
}

fn monospace(text: &str, ctx: &mut PassContext<'_>) -> String {
    let text = wiki::MONOSPACE.replace_all(text, |caps: &Captures| {
        ctx.stash.protect_inline(format!(
            "<code class=\"monospace\">{}</code>",
            encode_text(&caps[1])
        ))
    });
    wiki::INLINE_CODE
        .replace_all(&text, |caps: &Captures| {
            ctx.stash
                .protect_inline(format!("<code>{}</code>", encode_text(&caps[1])))
        })
        .into_owned()
}

fn horizontal_rules(text: &str, _ctx: &mut PassContext<'_>) -> String {
    wiki::HORIZONTAL_RULE.replace_all(text, "<hr>").into_owned()
}

fn headings(text: &str, _ctx: &mut PassContext<'_>) -> String {
    let mut text = text.to_string();
    for (level, pattern) in wiki::HEADINGS.iter() {
        text = pattern
            .replace_all(&text, format!("<h{level}>$1</h{level}>").as_str())
            .into_owned();
    }
    text
}

// The TOC placeholder is left for the `toc` pass, which needs the rendered headings.
fn callouts(text: &str, _ctx: &mut PassContext<'_>) -> String {
    let mut text = text.to_string();
    for callout in Callout::ALL {
        text = callout
            .pattern()
            .replace_all(&text, |caps: &Captures| {
                format!(
                    "<div class=\"{}\">{} {}</div>",
                    callout.css_class(),
                    callout.glyph(),
                    wiki::code_body(&caps[1])
                )
            })
            .into_owned();
    }
    text
}

fn emphasis(text: &str, _ctx: &mut PassContext<'_>) -> String {
    let text = wiki::BOLD_ITALIC.replace_all(text, "<strong><em>$1</em></strong>");
    let text = wiki::TRIPLE_STAR.replace_all(&text, "<strong><em>$1</em></strong>");
    let text = wiki::BOLD.replace_all(&text, "<strong>$1</strong>");
    let text = wiki::ITALIC.replace_all(&text, "$1<em>$2</em>");
    let text = wiki::STRIKETHROUGH.replace_all(&text, "<del>$1</del>");
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

fn image_tag(src: &str, alt: &str, location: Option<&LocationHint>) -> String {
    let src = resolve_image_path(src.trim(), location);
    format!(
        "<img src=\"{}\" alt=\"{}\" />",
        encode_double_quoted_attribute(&src),
        encode_double_quoted_attribute(alt)
    )
}

fn images(text: &str, ctx: &mut PassContext<'_>) -> String {
    let location = ctx.location;
    let text = wiki::IMAGE_WITH_ALT.replace_all(text, |caps: &Captures| {
        image_tag(&caps[1], &caps[2], location)
    });
    wiki::IMAGE
        .replace_all(&text, |caps: &Captures| image_tag(&caps[1], "Image", location))
        .into_owned()
}

fn links(text: &str, _ctx: &mut PassContext<'_>) -> String {
    wiki::LINK
        .replace_all(text, r#"<a href="$2">$1</a>"#)
        .into_owned()
}

fn blockquotes(text: &str, _ctx: &mut PassContext<'_>) -> String {
    blocks::blockquotes(text)
}

fn definitions(text: &str, _ctx: &mut PassContext<'_>) -> String {
    wiki::DEFINITION
        .replace_all(text, "<dt>$1</dt><dd>$2</dd>")
        .into_owned()
}

/// Every placeholder becomes the outline of the headings rendered so far. The outline is
/// protected so list, table and paragraph passes leave its lines alone.
fn toc(text: &str, ctx: &mut PassContext<'_>) -> String {
    if !text.contains(TOC_PLACEHOLDER) {
        return text.to_string();
    }
    let entries = extract_entries(&ctx.stash.restore(text));
    let token = ctx.stash.protect_block(render_outline(&entries));
    text.replace(TOC_PLACEHOLDER, &token)
}

fn line_breaks(text: &str, _ctx: &mut PassContext<'_>) -> String {
    wiki::LINE_BREAK.replace_all(text, "<br>").into_owned()
}

fn lists(text: &str, _ctx: &mut PassContext<'_>) -> String {
    render_lists(text)
}

fn tables(text: &str, _ctx: &mut PassContext<'_>) -> String {
    blocks::definition_lists(&blocks::tables(text))
}

fn paragraphs(text: &str, _ctx: &mut PassContext<'_>) -> String {
    blocks::paragraphs(text)
}
