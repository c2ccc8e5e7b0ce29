//! Standalone preview page
//!
//! Rendered fragments are meant to be embedded; [`wrap_page`] produces the document that
//! hosts one: a strict content security policy that only admits images and inline
//! styles from the preview's own origin, plus the embedded stylesheet.

/// Source expression used in the content security policy when none is given.
pub const DEFAULT_CSP_SOURCE: &str = "'self'";

pub const DEFAULT_TITLE: &str = "XWiki Preview";

/// The embedded preview stylesheet.
pub fn default_css() -> &'static str {
    include_str!("../../../css/preview.css")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOptions {
    pub title: String,
    /// Origin allowed for images, scripts and styles.
    pub csp_source: String,
    /// Appended after the default stylesheet.
    pub custom_css: Option<String>,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            csp_source: DEFAULT_CSP_SOURCE.to_string(),
            custom_css: None,
        }
    }
}

pub fn content_security_policy(source: &str) -> String {
    format!(
        "default-src 'none'; img-src {source} https: data:; script-src {source} 'unsafe-inline'; style-src {source} 'unsafe-inline';"
    )
}

/// Wrap a rendered fragment in a complete HTML document.
pub fn wrap_page(fragment: &str, options: &PageOptions) -> String {
    let title = html_escape::encode_text(&options.title);
    let csp = html_escape::encode_double_quoted_attribute(&content_security_policy(
        &options.csp_source,
    ))
    .into_owned();
    let css = default_css();
    let custom_css = options.custom_css.as_deref().unwrap_or("");

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <meta http-equiv="Content-Security-Policy" content="{csp}">
  <meta name="generator" content="xwiki-babel">
  <title>{title}</title>
  <style>
{css}
{custom_css}
  </style>
</head>
<body>
{fragment}
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_declares_policy_and_styles() {
        let page = wrap_page("<p>hi</p>", &PageOptions::default());
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains(
            "content=\"default-src 'none'; img-src 'self' https: data:; script-src 'self' 'unsafe-inline'; style-src 'self' 'unsafe-inline';\""
        ));
        assert!(page.contains("<title>XWiki Preview</title>"));
        assert!(page.contains(".info-box"));
        assert!(page.contains("<body>\n<p>hi</p>\n</body>"));
    }

    #[test]
    fn title_is_escaped_and_custom_css_appended() {
        let options = PageOptions {
            title: "A <b> & c".to_string(),
            custom_css: Some("body { color: red; }".to_string()),
            ..PageOptions::default()
        };
        let page = wrap_page("", &options);
        assert!(page.contains("<title>A &lt;b&gt; &amp; c</title>"));
        assert!(page.contains("body { color: red; }\n  </style>"));
    }
}
