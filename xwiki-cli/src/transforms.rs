//! CLI-specific transforms
//!
//! Inspection views of a conversion, used by `xwiki inspect`:
//!
//! - `trace-text`: the document after every pass, one section per pass
//! - `trace-json`: the same as a JSON array of `{ "pass", "output" }`
//! - `passes`: the pass names of the conversion pipeline, in order
//! - `toc-json`: the headings the table of contents would list
//!
//! ## Extra Parameters
//!
//! Extra parameters are passed through to the target format, so `--extra-document` and
//! friends affect traces into HTML the same way they affect `convert`.
//!
//! Example: `xwiki inspect page.xwiki trace-text --to html --extra-document /abs/page.xwiki`

use serde::Serialize;
use std::collections::HashMap;
use xwiki_babel::formats::html::toc::extract_entries;
use xwiki_babel::{xwiki_to_html, FormatRegistry, PassTrace};

/// All available CLI transforms
pub const AVAILABLE_TRANSFORMS: &[&str] = &["trace-text", "trace-json", "passes", "toc-json"];

pub const DEFAULT_TRANSFORM: &str = "trace-text";

/// Conversion a transform looks at.
#[derive(Debug, Clone, Copy)]
pub struct Conversion<'a> {
    pub from: &'a str,
    pub to: &'a str,
}

/// Execute a named transform on a source document
///
/// # Returns
///
/// The transformed output as a string, or an error message
pub fn execute_transform(
    source: &str,
    transform_name: &str,
    conversion: Conversion<'_>,
    extra_params: &HashMap<String, String>,
) -> Result<String, String> {
    let registry = FormatRegistry::default();
    match transform_name {
        "trace-text" => {
            let traces = registry
                .trace_with_options(source, conversion.from, conversion.to, extra_params)
                .map_err(|e| format!("Transform failed: {e}"))?;
            Ok(traces_to_text(&traces))
        }
        "trace-json" => {
            let traces = registry
                .trace_with_options(source, conversion.from, conversion.to, extra_params)
                .map_err(|e| format!("Transform failed: {e}"))?;
            to_json(&traces)
        }
        "passes" => {
            let pipeline = registry
                .get(conversion.to)
                .and_then(|format| format.require_pipeline(conversion.from))
                .map_err(|e| format!("Transform failed: {e}"))?;
            let mut out = String::new();
            for name in pipeline.pass_names() {
                out.push_str(name);
                out.push('\n');
            }
            Ok(out)
        }
        "toc-json" => {
            let xwiki = registry
                .convert(source, conversion.from, "xwiki")
                .map_err(|e| format!("Transform failed: {e}"))?;
            to_json(&extract_entries(&xwiki_to_html(&xwiki, None)))
        }
        _ => Err(format!("Unknown transform: {transform_name}")),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value)
        .map(|json| json + "\n")
        .map_err(|e| format!("JSON serialization failed: {e}"))
}

fn traces_to_text(traces: &[PassTrace]) -> String {
    let mut out = String::new();
    for (i, trace) in traces.iter().enumerate() {
        out.push_str(&format!("── {:>2} {} ──\n", i + 1, trace.pass));
        out.push_str(&trace.output);
        if !trace.output.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}
