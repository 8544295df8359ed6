//! JSON Schema to XML Schema conversion
//!
//! The conversion runs in three steps:
//!
//! 1. [`preprocess::normalize`] folds definitions-only roots into an object
//!    schema and strips `false` markers with no XSD meaning.
//! 2. The root `properties` are converted recursively into the named root
//!    complex type.
//! 3. Every entry of the root `definitions` becomes a named complex type.
//!
//! Some JSON Schema constructs have no faithful XSD mapping (`oneOf`, array
//! occurrence bounds). For those the converter synthesizes element names and
//! reports a [`ReviewNotice`] so the output can be checked by hand.

mod config;
mod definitions;
mod facets;
mod preprocess;
mod properties;
mod types;

pub use config::{ConverterConfig, WrappingMode};
pub use preprocess::normalize;
pub use properties::required_names;
pub use types::{classify, resolve, SchemaKind};

use crate::documents::{Document, Element};
use crate::error::{ensure, require, Result};
use crate::locations::SchemaPath;
use crate::names;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::io::Write;

/// Kind of advisory message produced during conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoticeKind {
    /// A `oneOf` branch was given a synthesized element name
    SynthesizedChoiceName,
    /// A bounded array item was given a synthesized element name
    SynthesizedArrayItemName,
    /// A synthesized name is not a valid NCName
    InvalidSynthesizedName,
    /// A `oneOf` clause was not an array and produced an empty choice
    MalformedOneOf,
    /// A `oneOf` branch was not a schema object and was left out
    SkippedChoiceBranch,
}

/// Something in the output that needs manual review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewNotice {
    /// What happened
    pub kind: NoticeKind,
    /// JSON pointer of the input node
    pub path: String,
    /// Human-readable description
    pub message: String,
}

impl fmt::Display for ReviewNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at {})", self.message, self.path)
    }
}

/// Result of a successful conversion
#[derive(Debug, Clone)]
pub struct Conversion {
    /// The generated XML Schema document
    pub document: Document,
    /// Advisory messages about approximated constructs
    pub notices: Vec<ReviewNotice>,
}

impl Conversion {
    /// Check if the output needs manual review
    pub fn needs_review(&self) -> bool {
        !self.notices.is_empty()
    }
}

/// State shared by all recursive steps of a single conversion
pub(crate) struct ConversionContext<'a> {
    pub(crate) config: &'a ConverterConfig,
    /// Namespace prefix qualifying references
    pub(crate) prefix: String,
    /// Property keys kept verbatim as element names
    pub(crate) verbatim_keys: Vec<String>,
    pub(crate) notices: Vec<ReviewNotice>,
}

impl<'a> ConversionContext<'a> {
    pub(crate) fn new(config: &'a ConverterConfig, prefix: String) -> Self {
        Self {
            config,
            prefix,
            verbatim_keys: config.verbatim_keys(),
            notices: Vec::new(),
        }
    }

    /// Qualify a type name with the document prefix
    pub(crate) fn qualify(&self, local_name: &str) -> String {
        format!("{}:{}", self.prefix, local_name)
    }

    pub(crate) fn notice(&mut self, kind: NoticeKind, path: &SchemaPath, message: String) {
        tracing::warn!(path = %path, "{}", message);
        self.notices.push(ReviewNotice {
            kind,
            path: path.to_string(),
            message,
        });
    }

    /// Report a synthesized element name
    pub(crate) fn review_name(
        &mut self,
        kind: NoticeKind,
        path: &SchemaPath,
        name: &str,
        location: &str,
    ) {
        self.notice(
            kind,
            path,
            format!(
                "Manual changes required: providing dummy element name '{}' {}",
                name, location
            ),
        );
        if !names::is_valid_ncname(name) {
            self.notice(
                NoticeKind::InvalidSynthesizedName,
                path,
                format!("Synthesized name '{}' is not a valid XML name", name),
            );
        }
    }
}

/// Converts JSON Schema documents using a fixed configuration
#[derive(Debug, Clone)]
pub struct Converter {
    config: ConverterConfig,
}

impl Converter {
    /// Create a converter
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Parse and convert JSON Schema text
    pub fn convert(&self, schema_text: &str) -> Result<Conversion> {
        self.config.limits().check_input_size(schema_text.len())?;
        let schema: Value = serde_json::from_str(schema_text)?;
        self.convert_value(schema)
    }

    /// Convert an already parsed JSON Schema
    pub fn convert_value(&self, schema: Value) -> Result<Conversion> {
        self.config.validate()?;
        let schema = normalize(schema);

        let root_name = names::to_root_name(self.config.root_name());
        let prefix = root_name.to_lowercase();
        let namespace = self.config.target_namespace();
        let mut ctx = ConversionContext::new(&self.config, prefix.clone());

        let _span = tracing::debug_span!("convert", root = %root_name).entered();

        let root_path = SchemaPath::root();
        ensure(
            schema.get("type").and_then(Value::as_str) == Some("object"),
            "root should have type=\"object\"",
            root_path.as_str(),
        )?;
        let properties_path = root_path.join("properties");
        let properties = require(
            schema.get("properties").and_then(Value::as_object),
            "\"properties\" property should be found in root of JSON schema",
            properties_path.as_str(),
        )?;
        ensure(
            !properties.is_empty(),
            "\"properties\" in root of JSON schema must not be empty",
            properties_path.as_str(),
        )?;

        let mut schema_root = Element::xsd("schema");
        schema_root
            .namespaces
            .set_default_namespace(crate::XSD_NAMESPACE);
        schema_root.namespaces.add_prefix(&prefix, namespace);
        schema_root.set_attribute("targetNamespace", namespace);
        schema_root.set_attribute("elementFormDefault", "qualified");

        if self.config.wrapping() == WrappingMode::Element {
            let wrapper = schema_root.create_xsd_child("element");
            wrapper.set_attribute("name", &root_name);
            wrapper.set_attribute("type", ctx.qualify(&root_name));
        }

        let complex_type = schema_root.create_xsd_child("complexType");
        complex_type.set_attribute("name", &root_name);
        let sequence = complex_type.create_xsd_child("sequence");
        let required = required_names(&schema, &root_path)?;
        properties::convert_properties(
            sequence,
            properties,
            &required,
            &properties_path,
            &mut ctx,
        )?;

        definitions::emit_definitions(&mut schema_root, &schema, &mut ctx)?;

        tracing::debug!(
            "converted schema '{}' with {} review notice(s)",
            root_name,
            ctx.notices.len()
        );
        Ok(Conversion {
            document: Document::with_root(schema_root),
            notices: ctx.notices,
        })
    }

    /// Write a converted document as XML using the configured indentation
    pub fn write<W: Write>(&self, conversion: &Conversion, out: W) -> Result<()> {
        conversion.document.write_to(out, self.config.indent())
    }

    /// Parse, convert and serialize in one step
    pub fn convert_to_string(&self, schema_text: &str) -> Result<(String, Vec<ReviewNotice>)> {
        let conversion = self.convert(schema_text)?;
        let xml = conversion
            .document
            .to_xml_string_with_indent(self.config.indent())?;
        Ok((xml, conversion.notices))
    }
}
