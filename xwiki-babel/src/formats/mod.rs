//! Format implementations
//!
//! Each format knows the pipelines that produce it from other dialects.

pub mod html;
pub mod markdown;
pub mod xwiki;

pub use html::{HtmlFormat, HtmlOptions};
pub use markdown::MarkdownFormat;
pub use xwiki::XWikiFormat;
