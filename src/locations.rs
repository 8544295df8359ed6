//! Node locations inside the input schema
//!
//! Every error and review notice names the node it is about with a JSON
//! pointer (RFC 6901), built up while the converter descends.

use std::fmt;

/// JSON pointer to a node of the input schema
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SchemaPath {
    pointer: String,
}

impl SchemaPath {
    /// The document root
    pub fn root() -> Self {
        Self::default()
    }

    /// Path of a child member or array index
    pub fn join(&self, segment: impl fmt::Display) -> Self {
        let escaped = segment.to_string().replace('~', "~0").replace('/', "~1");
        Self {
            pointer: format!("{}/{}", self.pointer, escaped),
        }
    }

    /// Get the pointer as a string ("" for the root)
    pub fn as_str(&self) -> &str {
        &self.pointer
    }

    /// Nesting depth (number of segments)
    pub fn depth(&self) -> usize {
        self.pointer.matches('/').count()
    }

    /// Check if this is the document root
    pub fn is_root(&self) -> bool {
        self.pointer.is_empty()
    }
}

impl fmt::Display for SchemaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.pointer.is_empty() {
            write!(f, "/")
        } else {
            write!(f, "{}", self.pointer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path() {
        let root = SchemaPath::root();
        assert!(root.is_root());
        assert_eq!(root.as_str(), "");
        assert_eq!(root.to_string(), "/");
        assert_eq!(root.depth(), 0);
    }

    #[test]
    fn test_join_segments() {
        let path = SchemaPath::root().join("properties").join("tags").join(0);
        assert_eq!(path.as_str(), "/properties/tags/0");
        assert_eq!(path.depth(), 3);
    }

    #[test]
    fn test_join_escapes_pointer_characters() {
        let path = SchemaPath::root().join("a/b").join("c~d");
        assert_eq!(path.as_str(), "/a~1b/c~0d");
    }
}
