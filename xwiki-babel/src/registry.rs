//! Format registry for format discovery and selection
//!
//! This module provides a centralized registry for all available formats.
//! Formats can be registered and retrieved by name.

use crate::error::FormatError;
use crate::format::Format;
use crate::pipeline::PassTrace;
use std::collections::HashMap;

/// Registry of document formats
///
/// # Examples
///
/// ```ignore
/// let registry = FormatRegistry::default();
/// let wiki = registry.convert("# Title\n", "markdown", "xwiki")?;
/// assert_eq!(wiki, "= Title =\n");
/// ```
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Register a format
    ///
    /// If a format with the same name already exists, it will be replaced.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    /// Get a format by name
    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    /// Check if a format exists
    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// Detect format from filename based on file extension
    ///
    /// Returns the format name if a matching extension is found, or None otherwise.
    pub fn detect_format_from_filename(&self, filename: &str) -> Option<String> {
        let extension = std::path::Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())?
            .to_ascii_lowercase();

        self.formats
            .values()
            .find(|format| format.file_extensions().contains(&extension.as_str()))
            .map(|format| format.name().to_string())
    }

    /// Preferred file extension of a format (its first listed one).
    pub fn primary_extension(&self, format: &str) -> Result<String, FormatError> {
        let fmt = self.get(format)?;
        Ok(fmt
            .file_extensions()
            .first()
            .copied()
            .unwrap_or(fmt.name())
            .to_string())
    }

    /// Convert source text from one format to another
    pub fn convert(&self, source: &str, from: &str, to: &str) -> Result<String, FormatError> {
        self.convert_with_options(source, from, to, &HashMap::new())
    }

    /// Convert using the specified target format options
    pub fn convert_with_options(
        &self,
        source: &str,
        from: &str,
        to: &str,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        self.get(from)?;
        let target = self.get(to)?;
        log::debug!("converting {from} -> {to} ({} bytes)", source.len());
        target.convert_with_options(source, from, options)
    }

    /// Run a conversion, keeping the text after every pass
    pub fn trace_with_options(
        &self,
        source: &str,
        from: &str,
        to: &str,
        options: &HashMap<String, String>,
    ) -> Result<Vec<PassTrace>, FormatError> {
        self.get(from)?;
        self.get(to)?.trace_with_options(source, from, options)
    }
}

impl Default for FormatRegistry {
    /// Create a registry with the built-in formats
    fn default() -> Self {
        let mut registry = FormatRegistry::new();
        registry.register(crate::formats::XWikiFormat);
        registry.register(crate::formats::MarkdownFormat);
        registry.register(crate::formats::HtmlFormat::default());
        registry
    }
}
