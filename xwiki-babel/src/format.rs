//! Format trait definition
//!
//! This module defines the core Format trait that all format implementations must implement.
//! A format is a target dialect: it knows which source dialects it can be produced from and
//! which [`Pipeline`] does the work.

use crate::error::FormatError;
use crate::pipeline::{PassContext, PassTrace, Pipeline};
use std::collections::HashMap;

/// Trait for document formats
///
/// Implementors name a dialect and provide the pipelines that produce it from other
/// dialects. Converting a format to itself is the identity.
///
/// # Examples
///
/// ```ignore
/// struct Shouting;
///
/// impl Format for Shouting {
///     fn name(&self) -> &str {
///         "shouting"
///     }
///
///     fn pipeline_for(&self, from: &str) -> Option<Pipeline> {
///         (from == "markdown").then_some(SHOUT_PIPELINE)
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "xwiki", "markdown", "html")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format (e.g., ["xwiki"], ["md", "markdown"])
    ///
    /// Returns a slice of file extensions without the leading dot.
    /// Used for automatic format detection from filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Pipeline producing this format from `from`, if there is one.
    fn pipeline_for(&self, _from: &str) -> Option<Pipeline> {
        None
    }

    /// Whether this format can be produced from `from`.
    fn accepts(&self, from: &str) -> bool {
        from == self.name() || self.pipeline_for(from).is_some()
    }

    /// Option keys understood by [`Format::convert_with_options`].
    fn option_keys(&self) -> &[&str] {
        &[]
    }

    /// Convert `source`, written in `from`, into this format.
    fn convert(&self, source: &str, from: &str) -> Result<String, FormatError> {
        self.convert_with_options(source, from, &HashMap::new())
    }

    /// Convert with extra parameters.
    ///
    /// The default implementation rejects keys not listed in [`Format::option_keys`] and
    /// runs the pipeline with an empty context.
    fn convert_with_options(
        &self,
        source: &str,
        from: &str,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        check_option_keys(self.option_keys(), options)?;
        if from == self.name() {
            return Ok(source.to_string());
        }
        let pipeline = self.require_pipeline(from)?;
        Ok(pipeline.run(source, &mut PassContext::new()))
    }

    /// Record the text after every pass of the conversion.
    fn trace_with_options(
        &self,
        source: &str,
        from: &str,
        options: &HashMap<String, String>,
    ) -> Result<Vec<PassTrace>, FormatError> {
        check_option_keys(self.option_keys(), options)?;
        let pipeline = self.require_pipeline(from)?;
        Ok(pipeline.trace(source, &mut PassContext::new()))
    }

    /// Like [`Format::pipeline_for`], with a `NotSupported` error when missing.
    fn require_pipeline(&self, from: &str) -> Result<Pipeline, FormatError> {
        self.pipeline_for(from)
            .ok_or_else(|| FormatError::NotSupported {
                from: from.to_string(),
                to: self.name().to_string(),
            })
    }
}

/// Reject option keys a format does not understand.
pub fn check_option_keys(
    known: &[&str],
    options: &HashMap<String, String>,
) -> Result<(), FormatError> {
    let mut unknown: Vec<&String> = options
        .keys()
        .filter(|key| !known.contains(&key.as_str()))
        .collect();
    unknown.sort();
    match unknown.first() {
        Some(key) => Err(FormatError::InvalidOption {
            key: (*key).clone(),
            value: options[*key].clone(),
        }),
        None => Ok(()),
    }
}
