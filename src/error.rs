//! Error types for pipeline operations

use std::fmt;

/// Errors that can occur inside the transformation pipeline.
///
/// Most recoverable conditions (malformed front matter, bad widget payloads,
/// unsafe markup) never surface as errors at all; see the per-module
/// documentation for the recovery rules. What remains here is the small set
/// of genuinely unexpected failures.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// Error while parsing an input document
    ParseError(String),
    /// Error while serializing a tree back to text
    SerializationError(String),
    /// Error in the HTML → Markdown conversion
    ConversionError(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            PipelineError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            PipelineError::ConversionError(msg) => write!(f, "Conversion error: {msg}"),
        }
    }
}

impl std::error::Error for PipelineError {}
