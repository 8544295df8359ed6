//! # jsons2xsd
//!
//! Converts JSON Schema documents into equivalent XML Schema (XSD) documents.
//!
//! The supported JSON Schema subset is `type`, `properties`, `required`,
//! `definitions`, `$ref`, `enum`, `oneOf`, `items`, `minLength`/`maxLength`/
//! `pattern`, `minimum`/`maximum` and `minItems`/`maxItems`. Constructs that
//! XSD cannot express faithfully are approximated and reported as review
//! notices.
//!
//! ## Example
//!
//! ```rust
//! use jsons2xsd::{convert, WrappingMode};
//!
//! let schema = r#"{
//!     "type": "object",
//!     "properties": {"name": {"type": "string"}},
//!     "required": ["name"]
//! }"#;
//!
//! let document = convert(schema, "urn:example:widget", WrappingMode::Type, "Widget")?;
//! let xml = document.to_xml_string()?;
//! assert!(xml.contains(r#"<element name="Name" type="string"/>"#));
//! # Ok::<(), jsons2xsd::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod converters;
pub mod documents;
pub mod error;
pub mod limits;
pub mod loaders;
pub mod locations;
pub mod names;
pub mod namespaces;

pub use converters::{
    Conversion, Converter, ConverterConfig, NoticeKind, ReviewNotice, WrappingMode,
};
pub use documents::{Document, Element};
pub use error::{Error, Result};
pub use limits::Limits;

/// Version of the jsons2xsd library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// XSD 1.0 namespace
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// Convert JSON Schema text into an XSD document.
///
/// `root_name` names the generated root complex type (after casing rules) and
/// determines the namespace prefix bound to `target_namespace`.
pub fn convert(
    schema_text: &str,
    target_namespace: &str,
    wrapping: WrappingMode,
    root_name: &str,
) -> Result<Document> {
    let config = ConverterConfig::new(target_namespace, root_name).with_wrapping(wrapping);
    Ok(Converter::new(config).convert(schema_text)?.document)
}
