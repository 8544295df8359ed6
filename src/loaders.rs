//! Schema text loading
//!
//! Reads JSON Schema text from files or readers, enforcing the input size
//! limit before anything is parsed.

use crate::error::{Error, Result};
use crate::limits::Limits;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Loader for JSON Schema text
#[derive(Debug, Default)]
pub struct Loader {
    /// Resource limits
    limits: Limits,
}

impl Loader {
    /// Create a new loader with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Load schema text from a file
    pub fn load_path(&self, path: &Path) -> Result<String> {
        let size = fs::metadata(path).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read file '{}': {}", path.display(), e),
            ))
        })?;
        self.limits.check_input_size(size.len() as usize)?;

        fs::read_to_string(path).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read file '{}': {}", path.display(), e),
            ))
        })
    }

    /// Load schema text from a reader, such as stdin
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<String> {
        let limit = self.limits.max_input_size as u64;
        let mut content = String::new();
        reader.take(limit + 1).read_to_string(&mut content)?;
        self.limits.check_input_size(content.len())?;
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"type": "object"}}"#).unwrap();

        let content = Loader::new().load_path(file.path()).unwrap();
        assert!(content.contains(r#""type": "object""#));
    }

    #[test]
    fn test_missing_file() {
        let err = Loader::new()
            .load_path(Path::new("/nonexistent/schema.json"))
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("/nonexistent/schema.json"));
    }

    #[test]
    fn test_load_from_reader() {
        let content = Loader::new().load_reader(&b"{}"[..]).unwrap();
        assert_eq!(content, "{}");
    }

    #[test]
    fn test_size_limit() {
        let mut file = NamedTempFile::new().unwrap();
        let large_content = "x".repeat(11 * 1024 * 1024); // 11 MB
        write!(file, "{}", large_content).unwrap();

        // Strict limits (10 MB max) should reject an 11 MB file
        let loader = Loader::new().with_limits(Limits::strict());
        assert!(matches!(
            loader.load_path(file.path()),
            Err(Error::LimitExceeded(_))
        ));
        assert!(matches!(
            loader.load_reader(large_content.as_bytes()),
            Err(Error::LimitExceeded(_))
        ));
    }
}
