//! Limits and constraints for schema conversion
//!
//! The converter recurses once per nested schema node, so deeply nested or
//! oversized input is rejected up front instead of exhausting the stack.

use crate::error::{Error, Result};

/// Conversion limits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum JSON pointer depth of any converted node
    pub max_schema_depth: usize,

    /// Maximum schema text size in bytes
    pub max_input_size: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_schema_depth: 512,
            max_input_size: 100 * 1024 * 1024, // 100 MB
        }
    }
}

impl Limits {
    /// Create strict limits (more restrictive)
    pub fn strict() -> Self {
        Self {
            max_schema_depth: 64,
            max_input_size: 10 * 1024 * 1024, // 10 MB
        }
    }

    /// Check if schema depth is within limits
    pub fn check_schema_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_schema_depth {
            Err(Error::LimitExceeded(format!(
                "Schema depth {} exceeds maximum {}",
                depth, self.max_schema_depth
            )))
        } else {
            Ok(())
        }
    }

    /// Check if input size is within limits
    pub fn check_input_size(&self, size: usize) -> Result<()> {
        if size > self.max_input_size {
            Err(Error::LimitExceeded(format!(
                "Schema size {} bytes exceeds maximum {} bytes",
                size, self.max_input_size
            )))
        } else {
            Ok(())
        }
    }
}
