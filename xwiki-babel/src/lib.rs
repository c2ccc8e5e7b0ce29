//! Markdown ⇄ XWiki conversion and XWiki HTML preview
//!
//!     This crate converts documents between Markdown and XWiki 2.x markup, and renders XWiki
//!     to an HTML fragment for previewing. It is a pure lib: no files, no env vars, no printing.
//!     The xwiki-cli crate is the shell around it.
//!
//!     TLDR:
//!         - There is no parse tree. Every conversion is an ordered list of text rewrite passes
//!           (see ./pipeline.rs), and the order of that list is part of the contract.
//!         - Anything that must not be touched again (code, inline code, generated comments) is
//!           stashed behind an opaque token and restored after the last pass (./common/protect.rs).
//!         - Structures without closing markers (lists, tables, quote runs, paragraphs) are
//!           handled by line scanners that carry a small typed state.
//!
//! The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs                 # Format trait definition
//!     ├── registry.rs               # FormatRegistry for discovery and selection
//!     ├── pipeline.rs               # Pass, Pipeline, PassContext, traces
//!     ├── common
//!     │   ├── protect.rs            # protected span stash
//!     │   ├── wiki.rs               # XWiki patterns shared by both XWiki readers
//!     │   ├── table.rs              # pipe row parsing
//!     │   └── lines.rs              # run rewriting, indentation
//!     ├── formats
//!     │   ├── xwiki                 # Markdown → XWiki
//!     │   ├── markdown              # XWiki → Markdown
//!     │   └── html                  # XWiki → HTML (renderer, lists, blocks, toc, images, page)
//!     └── lib.rs
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     ├── properties                # proptest properties across all pipelines
//!     ├── fixtures                  # one document in every format
//!     └── <target format>
//!         └── mod.rs
//!
//!     Rust does not discover tests in subdirectories by default, so tests/lib.rs includes them.
//!
//! Location hints
//!
//!     Rendering takes an optional [`LocationHint`]. It is only used to turn image paths into
//!     URLs the preview can load; without one, image paths are left as written.

pub mod common;
pub mod error;
pub mod format;
pub mod formats;
pub mod pipeline;
pub mod registry;

pub use error::FormatError;
pub use format::Format;
pub use formats::html::images::{resolve_image_path, LocationHint};
pub use formats::html::toc::TocEntry;
pub use pipeline::{Pass, PassContext, PassTrace, Pipeline};
pub use registry::FormatRegistry;

/// Convert Markdown to XWiki markup.
pub fn markdown_to_xwiki(markdown: &str) -> String {
    formats::xwiki::from_markdown::convert(markdown)
}

/// Convert XWiki markup to Markdown.
pub fn xwiki_to_markdown(xwiki: &str) -> String {
    formats::markdown::from_xwiki::convert(xwiki)
}

/// Render XWiki markup to an HTML fragment.
pub fn xwiki_to_html(xwiki: &str, location: Option<&LocationHint>) -> String {
    formats::html::renderer::render(xwiki, location)
}
