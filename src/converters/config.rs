//! Converter configuration

use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::names;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// How the converted root is exposed in the generated schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WrappingMode {
    /// Emit a top-level element declaration typed by the root complex type
    Element,
    /// Emit only the named root complex type
    #[default]
    Type,
}

impl FromStr for WrappingMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "element" => Ok(WrappingMode::Element),
            "type" => Ok(WrappingMode::Type),
            _ => Err(Error::Config(format!(
                "Unknown wrapping mode: '{}'. Use: element, type",
                s
            ))),
        }
    }
}

impl fmt::Display for WrappingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WrappingMode::Element => write!(f, "element"),
            WrappingMode::Type => write!(f, "type"),
        }
    }
}

/// Configuration for a [`Converter`](super::Converter)
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    /// Target namespace URI of the generated schema
    target_namespace: String,
    /// Name of the generated root type, before casing rules apply
    root_name: String,
    /// Whether the root is also declared as an element
    wrapping: WrappingMode,
    /// Definition names emitted as the fixed HAL link type
    link_types: Vec<String>,
    /// Depth and size limits
    limits: Limits,
    /// Indentation used when writing XML
    indent: usize,
}

impl ConverterConfig {
    /// Create a configuration for a namespace and root name
    pub fn new(target_namespace: impl Into<String>, root_name: impl Into<String>) -> Self {
        Self {
            target_namespace: target_namespace.into(),
            root_name: root_name.into(),
            wrapping: WrappingMode::default(),
            link_types: vec!["Link".to_string()],
            limits: Limits::default(),
            indent: 2,
        }
    }

    /// Get the target namespace
    pub fn target_namespace(&self) -> &str {
        &self.target_namespace
    }

    /// Get the root name as given
    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    /// Get the wrapping mode
    pub fn wrapping(&self) -> WrappingMode {
        self.wrapping
    }

    /// Get the recognized link type names
    pub fn link_types(&self) -> &[String] {
        &self.link_types
    }

    /// Get the limits
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Get the indentation
    pub fn indent(&self) -> usize {
        self.indent
    }

    /// Check if a definition name is a recognized link type
    pub fn is_link_type(&self, name: &str) -> bool {
        self.link_types.iter().any(|t| t == name)
    }

    /// Property keys kept verbatim when naming elements
    pub fn verbatim_keys(&self) -> Vec<String> {
        self.link_types.iter().map(|t| t.to_lowercase()).collect()
    }

    /// Set wrapping mode
    pub fn with_wrapping(mut self, wrapping: WrappingMode) -> Self {
        self.wrapping = wrapping;
        self
    }

    /// Replace the recognized link type names
    pub fn with_link_types<I, S>(mut self, link_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.link_types = link_types.into_iter().map(Into::into).collect();
        self
    }

    /// Set limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Set indentation
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Check that the configuration can produce a well-formed schema
    pub fn validate(&self) -> Result<()> {
        if self.root_name.is_empty() {
            return Err(Error::Config("root name must not be empty".to_string()));
        }
        names::validate_ncname(&self.root_name)?;

        Url::parse(&self.target_namespace).map_err(|e| {
            Error::Config(format!(
                "target namespace '{}' is not an absolute URI: {}",
                self.target_namespace, e
            ))
        })?;

        for link_type in &self.link_types {
            names::validate_ncname(link_type)?;
        }
        Ok(())
    }
}
