//! XWiki dialect patterns
//!
//! Both pipelines that read XWiki (to Markdown and to HTML) recognise the same constructs,
//! so the patterns live here and each pipeline decides what to emit for them.
//!
//! | Construct        | XWiki                                  |
//! |------------------|----------------------------------------|
//! | Heading level n  | `= Title =` … `====== Title ======`    |
//! | Code block       | `{{code language="js"}}…{{/code}}`     |
//! | Monospace        | `{{monospace}}x{{/monospace}}`, `##x##`|
//! | Callout          | `{{info}}…{{/info}}` (warning, error)  |
//! | TOC placeholder  | `{{toc/}}`                             |
//! | Bold-italic      | `**//x//**`                            |
//! | Bold / italic    | `**x**` / `//x//`                      |
//! | Strike/underline | `--x--` / `__x__`                      |
//! | Super/subscript  | `^^x^^` / `,,x,,`                      |
//! | Styled span      | `(% style="color:red" %)x(%%)`         |
//! | Image            | `[[image:src]]`, `[[image:src||alt="a"]]` |
//! | Link             | `[[text>>target]]`                     |
//! | Definition       | `;term:description`                    |
//! | Line break       | `\\` at end of line                    |
//! | Rule             | `----`                                 |

use once_cell::sync::Lazy;
use regex::Regex;

pub const TOC_PLACEHOLDER: &str = "{{toc/}}";

/// Language tag written when a fenced block carries none.
pub const DEFAULT_CODE_LANGUAGE: &str = "none";

/// Headings, longest marker first: `(level, pattern)`.
pub static HEADINGS: Lazy<Vec<(usize, Regex)>> = Lazy::new(|| {
    (1..=6)
        .rev()
        .map(|level| {
            let marker = "=".repeat(level);
            let pattern = format!(r"(?m)^{marker} (.*?) {marker}[ \t]*$");
            (level, Regex::new(&pattern).unwrap())
        })
        .collect()
});

pub static CODE_MACRO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)\{\{code(?:\s+language="([^"]*)")?\s*\}\}(.*?)\{\{/code\}\}"#).unwrap()
});

pub static MONOSPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{monospace\}\}(.*?)\{\{/monospace\}\}").unwrap());

pub static INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"##(.+?)##").unwrap());

/// `**//x//**`, also accepting the `***//x//***` spelling.
pub static BOLD_ITALIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*\*?//(.+?)//\*\*\*?").unwrap());

pub static TRIPLE_STAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*\*(.+?)\*\*\*").unwrap());

pub static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());

/// Group 1 is the character before the opener; an opener right after `:` belongs to a URL.
pub static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"(^|[^:])//(.+?)//").unwrap());

/// Content may not start or end with `-`, so rules like `-----` never match.
pub static STRIKETHROUGH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"--([^-](?:.*?[^-])?)--").unwrap());

pub static UNDERLINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"__(.+?)__").unwrap());

pub static SUPERSCRIPT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\^\^(.+?)\^\^").unwrap());

pub static SUBSCRIPT: Lazy<Regex> = Lazy::new(|| Regex::new(r",,(.+?),,").unwrap());

pub static STYLED_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\(% style="([^"]+)" %\)(.*?)\(%%\)"#).unwrap());

pub static IMAGE_WITH_ALT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\[\[image:([^|\]]+)\|\|alt="([^"]*)"\]\]"#).unwrap());

pub static IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\[image:([^\]]+)\]\]").unwrap());

pub static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\[([^>\]]+)>>([^\]]+)\]\]").unwrap());

pub static DEFINITION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^;([^:\n]+):(.*)$").unwrap());

pub static LINE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)\\\\[ \t]*$").unwrap());

pub static HORIZONTAL_RULE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^----+[ \t]*$").unwrap());

/// Labeled callout macros.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Callout {
    Info,
    Warning,
    Error,
}

static INFO_MACRO: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\{\{info\}\}(.*?)\{\{/info\}\}").unwrap());
static WARNING_MACRO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{\{warning\}\}(.*?)\{\{/warning\}\}").unwrap());
static ERROR_MACRO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{\{error\}\}(.*?)\{\{/error\}\}").unwrap());

impl Callout {
    pub const ALL: [Callout; 3] = [Callout::Info, Callout::Warning, Callout::Error];

    /// Macro name, e.g. `info` in `{{info}}`.
    pub fn macro_name(self) -> &'static str {
        match self {
            Callout::Info => "info",
            Callout::Warning => "warning",
            Callout::Error => "error",
        }
    }

    /// Label used when the callout becomes a Markdown blockquote.
    pub fn label(self) -> &'static str {
        match self {
            Callout::Info => "Info",
            Callout::Warning => "Warning",
            Callout::Error => "Error",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Callout::Info => "ℹ️",
            Callout::Warning => "⚠️",
            Callout::Error => "❌",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Callout::Info => "info-box",
            Callout::Warning => "warning-box",
            Callout::Error => "error-box",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }

    pub fn pattern(self) -> &'static Regex {
        match self {
            Callout::Info => &INFO_MACRO,
            Callout::Warning => &WARNING_MACRO,
            Callout::Error => &ERROR_MACRO,
        }
    }
}

/// Body of a code macro without the line breaks that separate it from the macro tags.
pub fn code_body(raw: &str) -> &str {
    let body = raw.strip_prefix("\n").unwrap_or(raw);
    body.strip_suffix("\n").unwrap_or(body)
}

/// Language of a code macro, with the `none` placeholder mapped to `None`.
pub fn code_language(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim)
        .filter(|lang| !lang.is_empty() && *lang != DEFAULT_CODE_LANGUAGE)
}
