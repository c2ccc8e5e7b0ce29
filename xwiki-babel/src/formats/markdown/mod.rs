//! Markdown format implementation
//!
//! CommonMark-flavoured Markdown is produced from XWiki by the [`from_xwiki`] pipeline.
//!
//! # Element Mapping Table
//!
//! | XWiki                               | Markdown                       | Notes                                   |
//! |-------------------------------------|--------------------------------|-----------------------------------------|
//! | `{{code language="js"}}`            | ```` ```js ````                | `none` → no info string                 |
//! | `{{info}}x{{/info}}`                | `> **Info:** x`                | Also Warning and Error                  |
//! | `{{toc/}}`                          | `<!-- Table of Contents -->`   | Outline is not regenerated              |
//! | `{{monospace}}`, `##x##`            | `` `x` ``                      |                                         |
//! | `= … =` … `====== … ======`         | `# …` … `###### …`             |                                         |
//! | `**//x//**`, `**x**`, `//x//`       | `***x***`, `**x**`, `*x*`      |                                         |
//! | `--x--`                             | `~~x~~`                        |                                         |
//! | `__x__`, `^^x^^`, `,,x,,`           | `<u>`, `<sup>`, `<sub>`        | No native Markdown syntax               |
//! | `(% style="s" %)x(%%)`              | `<span style="s">x</span>`     |                                         |
//! | `[[text>>target]]`                  | `[text](target)`               |                                         |
//! | `[[image:src]]`                     | `![Image](src)`                | Explicit `alt="…"` is kept              |
//! | `;term:desc`                        | `**term**: desc`               |                                         |
//! | `\\` at end of line                 | two trailing spaces            |                                         |
//! | `|a|b|`                             | `|a|b|` + `|----|----|`        | Separator synthesized after first row   |
//! | `----`                              | `---`                          |                                         |
//! | `* x`, `1. x`                       | `- x`, `1. x`                  | Renderers renumber ordered lists        |
//!
//! # Lossy Conversions
//!
//! - Table of contents → placeholder comment (no items)
//! - Header cells (`|=`) → ordinary cells; the first row becomes the Markdown header
//! - Styled spans, underline, super/subscript → inline HTML

pub mod from_xwiki;

use crate::format::Format;
use crate::pipeline::Pipeline;

/// Format implementation for Markdown
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "CommonMark Markdown format"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn pipeline_for(&self, from: &str) -> Option<Pipeline> {
        match from {
            "xwiki" => Some(from_xwiki::PIPELINE),
            _ => None,
        }
    }
}
