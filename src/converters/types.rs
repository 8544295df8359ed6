//! JSON type to XSD type mapping
//!
//! Each schema node is classified once, before any output is produced for it.

use crate::error::{require, Error, Result, StructureError};
use crate::locations::SchemaPath;
use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashMap;

static TYPE_MAPPING: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // Primitive types
        ("string", "string"),
        ("object", "object"),
        ("array", "array"),
        ("number", "decimal"),
        ("boolean", "boolean"),
        ("integer", "int"),
        // Non-standard, often encountered in the wild
        ("int", "int"),
        ("date-time", "dateTime"),
        ("time", "time"),
        ("date", "date"),
        // String formats
        ("string|uri", "anyURI"),
        ("string|email", "string"),
        ("string|phone", "string"),
        ("string|date-time", "dateTime"),
        ("string|date", "date"),
        ("string|time", "time"),
        ("string|utc-millisec", "long"),
        ("string|regex", "string"),
        ("string|color", "string"),
        ("string|style", "string"),
    ])
});

/// Resolve a JSON type and optional format to an XSD type name or control token
pub fn resolve(json_type: &str, format: Option<&str>) -> Option<&'static str> {
    let key = match format {
        Some(format) => format!("{}|{}", json_type, format),
        None => json_type.to_string(),
    };
    TYPE_MAPPING.get(key.to_lowercase().as_str()).copied()
}

/// What kind of XSD construct a schema node becomes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    /// `$ref` to a definition
    Reference,
    /// `enum` value list
    Enum,
    /// Object with properties or `oneOf`
    Object,
    /// Array with `items`
    Array,
    /// Built-in XSD simple type
    Simple(&'static str),
}

impl SchemaKind {
    /// Type name or control token of this kind
    pub fn token(&self) -> &'static str {
        match self {
            SchemaKind::Reference => "reference",
            SchemaKind::Enum => "enum",
            SchemaKind::Object => "object",
            SchemaKind::Array => "array",
            SchemaKind::Simple(xsd_type) => *xsd_type,
        }
    }
}

/// Classify a schema node.
///
/// `$ref` wins over `enum`, which wins over `type`.
pub fn classify(node: &Value, path: &SchemaPath) -> Result<SchemaKind> {
    if node.get("$ref").is_some() {
        return Ok(SchemaKind::Reference);
    }
    if node.get("enum").is_some() {
        return Ok(SchemaKind::Enum);
    }

    let json_type = match node.get("type") {
        Some(Value::String(json_type)) => json_type.as_str(),
        Some(_) => {
            return Err(StructureError::new("type must be a single string")
                .with_path(path.to_string())
                .with_snippet(node.to_string())
                .into())
        }
        None => {
            return Err(StructureError::new("type must be specified on node")
                .with_path(path.to_string())
                .with_snippet(node.to_string())
                .into())
        }
    };
    let format = match node.get("format") {
        None | Some(Value::Null) => None,
        Some(format) => Some(require(
            format.as_str(),
            "format must be a string",
            path.join("format").as_str(),
        )?),
    };

    let xsd_type = resolve(json_type, format).ok_or_else(|| Error::UnmappableType {
        path: path.to_string(),
        json_type: json_type.to_string(),
        format: format.map(str::to_string),
    })?;

    Ok(match xsd_type {
        "object" => SchemaKind::Object,
        "array" => SchemaKind::Array,
        other => SchemaKind::Simple(other),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_primitives() {
        assert_eq!(resolve("string", None), Some("string"));
        assert_eq!(resolve("number", None), Some("decimal"));
        assert_eq!(resolve("integer", None), Some("int"));
        assert_eq!(resolve("boolean", None), Some("boolean"));
        assert_eq!(resolve("object", None), Some("object"));
        assert_eq!(resolve("array", None), Some("array"));
    }

    #[test]
    fn test_resolve_informal_types() {
        assert_eq!(resolve("int", None), Some("int"));
        assert_eq!(resolve("date-time", None), Some("dateTime"));
        assert_eq!(resolve("date", None), Some("date"));
        assert_eq!(resolve("time", None), Some("time"));
    }

    #[test]
    fn test_resolve_string_formats() {
        let table = [
            ("uri", "anyURI"),
            ("email", "string"),
            ("phone", "string"),
            ("date-time", "dateTime"),
            ("date", "date"),
            ("time", "time"),
            ("utc-millisec", "long"),
            ("regex", "string"),
            ("color", "string"),
            ("style", "string"),
        ];
        for (format, expected) in table {
            assert_eq!(resolve("string", Some(format)), Some(expected), "format {}", format);
        }
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        assert_eq!(resolve("String", Some("URI")), Some("anyURI"));
        assert_eq!(resolve("INTEGER", None), Some("int"));
    }

    #[test]
    fn test_resolve_unmapped() {
        assert_eq!(resolve("null", None), None);
        assert_eq!(resolve("integer", Some("int64")), None);
        assert_eq!(resolve("string", Some("uuid")), None);
    }

    #[test]
    fn test_classify_order() {
        let root = SchemaPath::root();
        let both = json!({"$ref": "#/definitions/A", "enum": ["x"], "type": "string"});
        assert_eq!(classify(&both, &root).unwrap(), SchemaKind::Reference);

        let enumeration = json!({"enum": ["x"], "type": "integer"});
        assert_eq!(classify(&enumeration, &root).unwrap(), SchemaKind::Enum);

        let date = json!({"type": "string", "format": "date"});
        assert_eq!(classify(&date, &root).unwrap(), SchemaKind::Simple("date"));

        assert_eq!(classify(&json!({"type": "array"}), &root).unwrap(), SchemaKind::Array);
        assert_eq!(classify(&json!({"type": "object"}), &root).unwrap(), SchemaKind::Object);
    }

    #[test]
    fn test_classify_failures() {
        let path = SchemaPath::root().join("properties").join("id");

        let err = classify(&json!({"description": "no type"}), &path).unwrap_err();
        assert!(matches!(err, Error::Structure(_)));
        assert!(err.to_string().contains("/properties/id"));

        let err = classify(&json!({"type": ["string", "null"]}), &path).unwrap_err();
        assert!(matches!(err, Error::Structure(_)));

        let err = classify(&json!({"type": "integer", "format": "int64"}), &path).unwrap_err();
        match err {
            Error::UnmappableType { path, json_type, format } => {
                assert_eq!(path, "/properties/id");
                assert_eq!(json_type, "integer");
                assert_eq!(format.as_deref(), Some("int64"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_kind_tokens() {
        assert_eq!(SchemaKind::Reference.token(), "reference");
        assert_eq!(SchemaKind::Simple("anyURI").token(), "anyURI");
    }
}
