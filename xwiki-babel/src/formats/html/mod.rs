//! HTML format implementation
//!
//! XWiki documents are rendered to an HTML fragment by the [`renderer`] pipeline. With the
//! `standalone` option the fragment is wrapped in the preview page of [`page`].
//!
//! # Element Mapping Table
//!
//! | XWiki                          | HTML                                                   |
//! |--------------------------------|--------------------------------------------------------|
//! | `= … =` … `====== … ======`    | `<h1>` … `<h6>`                                        |
//! | `----`                         | `<hr>`                                                 |
//! | `{{code language="L"}}`        | `<pre><code class="language-L">`, body escaped         |
//! | `{{monospace}}`, `##x##`       | `<code class="monospace">`, `<code>`                   |
//! | `{{info}}`, `{{warning}}`, `{{error}}` | `<div class="info-box">ℹ️ …</div>` etc.        |
//! | `{{toc/}}`                     | `<div class="toc">` outline of the headings            |
//! | `**//x//**`, `**x**`, `//x//`  | `<strong><em>`, `<strong>`, `<em>`                     |
//! | `--x--`, `__x__`               | `<del>`, `<u>`                                         |
//! | `^^x^^`, `,,x,,`               | `<sup>`, `<sub>`                                       |
//! | `(% style="s" %)x(%%)`         | `<span style="s">`                                     |
//! | `[[image:src]]`                | `<img src="…" alt="Image" />`, src resolved            |
//! | `[[text>>target]]`             | `<a href="target">`                                    |
//! | `> x` lines                    | one `<blockquote>` per run, lines joined by `<br>`     |
//! | `;term:desc` lines             | `<dl>` of `<dt>`/`<dd>`                                |
//! | `* x`, `1. x`                  | nested `<ul>`/`<ol>`                                   |
//! | `|a|b|`, `|=H|`                | `<table>` of `<td>`/`<th>`                             |
//! | other text                     | `<p>` per blank-line separated block                   |
//!
//! # Options
//!
//! | Key              | Value                                   |
//! |------------------|-----------------------------------------|
//! | `document`       | absolute path of the source document    |
//! | `workspace-root` | directory for `/`-rooted image paths    |
//! | `resource-base`  | URL local files are served from         |
//! | `standalone`     | `true` for a complete page              |
//! | `custom-css`     | stylesheet appended to the default one  |
//! | `title`          | page title                              |
//!
//! Text outside code is not escaped: markup the renderer does not recognise, including raw
//! HTML, passes through.

pub mod blocks;
pub mod highlight;
pub mod images;
pub mod lists;
pub mod page;
pub mod renderer;
pub mod toc;

use crate::error::FormatError;
use crate::format::{check_option_keys, Format};
use crate::pipeline::{PassContext, PassTrace, Pipeline};
use images::LocationHint;
use page::{PageOptions, DEFAULT_CSP_SOURCE, DEFAULT_TITLE};
use std::collections::HashMap;
use std::path::PathBuf;
use url::Url;

const OPTION_KEYS: &[&str] = &[
    "document",
    "workspace-root",
    "resource-base",
    "standalone",
    "custom-css",
    "title",
];

/// Rendering options, settable per call through the option map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlOptions {
    pub document: Option<PathBuf>,
    pub workspace_root: Option<PathBuf>,
    pub resource_base: Option<Url>,
    pub standalone: bool,
    pub custom_css: Option<String>,
    pub title: Option<String>,
}

impl HtmlOptions {
    /// Overlay string options onto these options.
    pub fn apply(&mut self, options: &HashMap<String, String>) -> Result<(), FormatError> {
        check_option_keys(OPTION_KEYS, options)?;
        for (key, value) in options {
            let invalid = || FormatError::InvalidOption {
                key: key.clone(),
                value: value.clone(),
            };
            match key.as_str() {
                "document" => self.document = Some(PathBuf::from(value)),
                "workspace-root" => self.workspace_root = Some(PathBuf::from(value)),
                "resource-base" => self.resource_base = Some(Url::parse(value).map_err(|_| invalid())?),
                "standalone" => self.standalone = value.parse().map_err(|_| invalid())?,
                "custom-css" => self.custom_css = Some(value.clone()),
                "title" => self.title = Some(value.clone()),
                _ => return Err(invalid()),
            }
        }
        Ok(())
    }

    /// Location hint for image resolution; needs a document path.
    pub fn location_hint(&self) -> Option<LocationHint> {
        let document = self.document.clone()?;
        Some(LocationHint {
            document,
            workspace_root: self.workspace_root.clone(),
            resource_base: self.resource_base.clone(),
        })
    }

    pub fn page_options(&self) -> PageOptions {
        // Opaque origins serialize as "null", which no policy should allow.
        let csp_source = match &self.resource_base {
            Some(base) if base.origin().is_tuple() => base.origin().ascii_serialization(),
            _ => DEFAULT_CSP_SOURCE.to_string(),
        };
        PageOptions {
            title: self.title.clone().unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            csp_source,
            custom_css: self.custom_css.clone(),
        }
    }
}

/// Format implementation for HTML
#[derive(Debug, Default)]
pub struct HtmlFormat {
    options: HtmlOptions,
}

impl HtmlFormat {
    pub fn new(options: HtmlOptions) -> Self {
        Self { options }
    }

    /// Always produce a complete page.
    pub fn standalone() -> Self {
        Self::new(HtmlOptions {
            standalone: true,
            ..HtmlOptions::default()
        })
    }

    fn resolve_options(&self, options: &HashMap<String, String>) -> Result<HtmlOptions, FormatError> {
        let mut resolved = self.options.clone();
        resolved.apply(options)?;
        Ok(resolved)
    }
}

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML preview of XWiki documents"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn pipeline_for(&self, from: &str) -> Option<Pipeline> {
        match from {
            "xwiki" => Some(renderer::PIPELINE),
            _ => None,
        }
    }

    fn option_keys(&self) -> &[&str] {
        OPTION_KEYS
    }

    fn convert_with_options(
        &self,
        source: &str,
        from: &str,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let options = self.resolve_options(options)?;
        if from == self.name() {
            return Ok(source.to_string());
        }
        let pipeline = self.require_pipeline(from)?;
        let hint = options.location_hint();
        let fragment = pipeline.run(source, &mut PassContext::with_location(hint.as_ref()));
        if options.standalone {
            Ok(page::wrap_page(&fragment, &options.page_options()))
        } else {
            Ok(fragment)
        }
    }

    fn trace_with_options(
        &self,
        source: &str,
        from: &str,
        options: &HashMap<String, String>,
    ) -> Result<Vec<PassTrace>, FormatError> {
        let options = self.resolve_options(options)?;
        let pipeline = self.require_pipeline(from)?;
        let hint = options.location_hint();
        Ok(pipeline.trace(source, &mut PassContext::with_location(hint.as_ref())))
    }
}
