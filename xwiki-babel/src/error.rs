//! Error types for format operations
//!
//! The conversion pipelines themselves never fail; these errors only come from
//! format selection and option handling in the registry layer.

use thiserror::Error;

/// Errors that can occur during format operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// The target format cannot be produced from the source format
    #[error("Conversion from '{from}' to '{to}' is not supported")]
    NotSupported { from: String, to: String },
    /// A format option carried a value the format cannot use
    #[error("Invalid value '{value}' for option '{key}'")]
    InvalidOption { key: String, value: String },
}
