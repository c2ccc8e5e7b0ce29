//! Common code shared by the conversion pipelines
//!
//! - [`protect`]: the protected span store
//! - [`wiki`]: XWiki dialect patterns read by both XWiki → Markdown and XWiki → HTML
//! - [`table`]: pipe-delimited row parsing, used in both directions
//! - [`lines`]: helpers for line-oriented scanning passes

pub mod lines;
pub mod protect;
pub mod table;
pub mod wiki;

use crate::pipeline::PassContext;

/// First pass of every pipeline: all later patterns anchor on `\n` only.
pub fn normalize_newlines(text: &str, _ctx: &mut PassContext<'_>) -> String {
    if text.contains('\r') {
        text.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_crlf_and_lone_cr() {
        let mut ctx = PassContext::new();
        assert_eq!(normalize_newlines("a\r\nb\rc\n", &mut ctx), "a\nb\nc\n");
    }
}
