//! XWiki format implementation
//!
//! XWiki 2.x wiki syntax is produced from Markdown by the [`from_markdown`] pipeline. Reading
//! XWiki is the job of the other formats (see `formats::markdown` and `formats::html`).
//!
//! # Element Mapping Table
//!
//! | Markdown                 | XWiki                                | Notes                              |
//! |--------------------------|--------------------------------------|------------------------------------|
//! | ```` ```lang ````        | `{{code language="lang"}}`           | Missing language → `none`          |
//! | `` `code` ``             | `##code##`                           |                                    |
//! | `# … ######`             | `= … =` … `====== … ======`          |                                    |
//! | `---`, `***`, `___`      | `----`                               |                                    |
//! | `> **Info:** x`          | `{{info}}x{{/info}}`                 | Also Warning and Error             |
//! | `<!-- Table of Contents -->` | `{{toc/}}`                       |                                    |
//! | `***x***`                | `**//x//**`                          |                                    |
//! | `**x**`, `__x__`         | `**x**`                              |                                    |
//! | `*x*`                    | `//x//`                              |                                    |
//! | `~~x~~`                  | `--x--`                              |                                    |
//! | `<u>`, `<sup>`, `<sub>`  | `__x__`, `^^x^^`, `,,x,,`            |                                    |
//! | `![alt](src)`            | `[[image:src]]`                      | Alt text is dropped                |
//! | `[text](target)`         | `[[text>>target]]`                   |                                    |
//! | `- x`, `+ x`             | `* x`                                | Indentation kept                   |
//! | `3. x`                   | `1. x`                               | XWiki numbers lists itself         |
//! | `| a | b |` + `|---|---|` | `|a|b|`                             | Separator row removed              |

pub mod from_markdown;

use crate::format::Format;
use crate::pipeline::Pipeline;

/// Format implementation for XWiki 2.x syntax
pub struct XWikiFormat;

impl Format for XWikiFormat {
    fn name(&self) -> &str {
        "xwiki"
    }

    fn description(&self) -> &str {
        "XWiki 2.x wiki syntax"
    }

    fn file_extensions(&self) -> &[&str] {
        &["xwiki"]
    }

    fn pipeline_for(&self, from: &str) -> Option<Pipeline> {
        match from {
            "markdown" => Some(from_markdown::PIPELINE),
            _ => None,
        }
    }
}
