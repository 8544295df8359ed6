//! Error types for jsons2xsd
//!
//! This module defines all error types used throughout the library, together
//! with the small assertion helpers the converter uses to reject input that
//! cannot be represented in XML Schema.

use std::fmt;
use thiserror::Error;

/// Result type alias using jsons2xsd Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for conversions
#[derive(Error, Debug)]
pub enum Error {
    /// The JSON Schema does not have the shape the converter requires
    #[error("schema structure error: {0}")]
    Structure(#[from] StructureError),

    /// A (type, format) pair has no XSD counterpart
    #[error(
        "unable to determine XSD type for json type={json_type}, format={} at {path}",
        .format.as_deref().unwrap_or("null")
    )]
    UnmappableType {
        /// JSON pointer of the offending node
        path: String,
        /// Declared JSON type
        json_type: String,
        /// Declared format, if any
        format: Option<String>,
    },

    /// Input text is not JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid converter configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Name error (invalid XML name)
    #[error("name error: {0}")]
    Name(String),

    /// Limit exceeded error
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// XML writing or parsing error
    #[error("XML error: {0}")]
    Xml(String),
}

impl Error {
    /// Returns true for errors caused by the shape of the input schema
    pub fn is_schema_error(&self) -> bool {
        matches!(self, Error::Structure(_) | Error::UnmappableType { .. })
    }
}

/// Structural problem found in the input schema
#[derive(Debug, Clone)]
pub struct StructureError {
    /// Error message
    pub message: String,
    /// JSON pointer of the node that failed the check
    pub path: Option<String>,
    /// Compact JSON text of the offending node
    pub snippet: Option<String>,
}

impl StructureError {
    /// Create a new structure error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
            snippet: None,
        }
    }

    /// Set the path of the offending node
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the offending node text
    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }
}

impl fmt::Display for StructureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(ref path) = self.path {
            write!(f, "\n\nPath: {}", path)?;
        }

        if let Some(ref snippet) = self.snippet {
            write!(f, "\n\nNode:\n{}", snippet)?;
        }

        Ok(())
    }
}

impl std::error::Error for StructureError {}

/// Fail with a structure error unless `condition` holds
pub fn ensure(condition: bool, message: impl Into<String>, path: &str) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(StructureError::new(message).with_path(path).into())
    }
}

/// Unwrap `value` or fail with a structure error
pub fn require<T>(value: Option<T>, message: impl Into<String>, path: &str) -> Result<T> {
    value.ok_or_else(|| StructureError::new(message).with_path(path).into())
}
