//! XML document tree for the generated schema
//!
//! The converter builds an owned element tree, which is written out with
//! quick-xml. Generated documents can be parsed back for inspection.

use crate::error::{Error, Result};
use crate::namespaces::{NamespaceContext, QName};
use indexmap::IndexMap;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::io::Write;

/// XML Element in the document tree
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Element qualified name
    pub qname: QName,
    /// Element attributes, in insertion order
    pub attributes: IndexMap<String, String>,
    /// Child elements
    pub children: Vec<Element>,
    /// Namespace declarations on this element
    pub namespaces: NamespaceContext,
}

impl Element {
    /// Create a new element
    pub fn new(qname: QName) -> Self {
        Self {
            qname,
            attributes: IndexMap::new(),
            children: Vec::new(),
            namespaces: NamespaceContext::new(),
        }
    }

    /// Create a new element in the XML Schema namespace
    pub fn xsd(local_name: &str) -> Self {
        Self::new(QName::xsd(local_name))
    }

    /// Get the local name of the element
    pub fn local_name(&self) -> &str {
        &self.qname.local_name
    }

    /// Get an attribute value by name
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// Check if an attribute is present
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Set an attribute, replacing any previous value in place
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Remove an attribute, returning its value
    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.attributes.shift_remove(name)
    }

    /// Add a child element
    pub fn add_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Append a new XSD-namespaced child and return it for population
    pub fn create_xsd_child(&mut self, local_name: &str) -> &mut Element {
        self.children.push(Element::xsd(local_name));
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Find child elements by local name
    pub fn find_children(&self, local_name: &str) -> Vec<&Element> {
        self.children
            .iter()
            .filter(|e| e.local_name() == local_name)
            .collect()
    }

    /// Find the first child element with a local name
    pub fn find_child(&self, local_name: &str) -> Option<&Element> {
        self.children.iter().find(|e| e.local_name() == local_name)
    }

    /// Find the first child with a local name and a `name` attribute
    pub fn find_named(&self, local_name: &str, name: &str) -> Option<&Element> {
        self.children
            .iter()
            .find(|e| e.local_name() == local_name && e.get_attribute("name") == Some(name))
    }

    /// Follow a path of local names through first-matching children
    pub fn descend(&self, path: &[&str]) -> Option<&Element> {
        path.iter()
            .try_fold(self, |elem, local_name| elem.find_child(local_name))
    }

    fn write<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let name = self.local_name();
        let mut start = BytesStart::new(name);
        if let Some(ns) = self.namespaces.get_default_namespace() {
            start.push_attribute(("xmlns", ns));
        }
        for (prefix, uri) in self.namespaces.prefixes() {
            start.push_attribute((format!("xmlns:{}", prefix).as_str(), uri));
        }
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if self.children.is_empty() {
            writer.write_event(Event::Empty(start)).map_err(xml_error)?;
        } else {
            writer.write_event(Event::Start(start)).map_err(xml_error)?;
            for child in &self.children {
                child.write(writer)?;
            }
            writer
                .write_event(Event::End(BytesEnd::new(name)))
                .map_err(xml_error)?;
        }
        Ok(())
    }
}

fn xml_error(err: impl std::fmt::Display) -> Error {
    Error::Xml(err.to_string())
}

/// XML Document representation
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Root element of the document
    pub root: Option<Element>,
    /// Whether the XML declaration carries `standalone="yes"`
    pub standalone: bool,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self {
            root: None,
            standalone: false,
        }
    }

    /// Create a standalone document with a root element
    pub fn with_root(root: Element) -> Self {
        Self {
            root: Some(root),
            standalone: true,
        }
    }

    /// Get the root element
    pub fn root(&self) -> Option<&Element> {
        self.root.as_ref()
    }

    /// Write the document as XML, indenting nested elements by `indent` spaces
    pub fn write_to<W: Write>(&self, out: W, indent: usize) -> Result<()> {
        let mut writer = if indent > 0 {
            Writer::new_with_indent(out, b' ', indent)
        } else {
            Writer::new(out)
        };

        let standalone = self.standalone.then_some("yes");
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), standalone)))
            .map_err(xml_error)?;

        if let Some(root) = &self.root {
            root.write(&mut writer)?;
        }
        Ok(())
    }

    /// Serialize the document to an indented XML string
    pub fn to_xml_string(&self) -> Result<String> {
        self.to_xml_string_with_indent(2)
    }

    /// Serialize the document with a specific indentation
    pub fn to_xml_string_with_indent(&self, indent: usize) -> Result<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf, indent)?;
        String::from_utf8(buf).map_err(xml_error)
    }

    /// Parse an XML document from a string
    pub fn from_string(xml: &str) -> Result<Self> {
        Self::parse(xml.as_bytes())
    }

    /// Parse an XML document from bytes
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.trim_text(true);

        let mut doc = Document::new();
        let mut element_stack: Vec<Element> = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Decl(decl)) => {
                    if let Some(Ok(value)) = decl.standalone() {
                        doc.standalone = &*value == b"yes";
                    }
                }
                Ok(Event::Start(e)) => {
                    let element = Self::parse_element(&e)?;
                    element_stack.push(element);
                }
                Ok(Event::End(_)) => {
                    if let Some(current) = element_stack.pop() {
                        if let Some(parent) = element_stack.last_mut() {
                            parent.add_child(current);
                        } else {
                            doc.root = Some(current);
                        }
                    }
                }
                Ok(Event::Empty(e)) => {
                    let element = Self::parse_element(&e)?;
                    if let Some(parent) = element_stack.last_mut() {
                        parent.add_child(element);
                    } else {
                        doc.root = Some(element);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::Xml(format!(
                        "Error parsing XML at position {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
                _ => {} // Text, comments and processing instructions carry no schema content
            }
            buf.clear();
        }

        Ok(doc)
    }

    fn parse_element(start: &BytesStart) -> Result<Element> {
        let name_bytes = start.name();
        let name = std::str::from_utf8(name_bytes.as_ref())
            .map_err(|e| Error::Xml(format!("Invalid element name: {}", e)))?;
        let local = name.split_once(':').map_or(name, |(_, local)| local);

        let mut element = Element::new(QName::local(local));

        for attr_result in start.attributes() {
            let attr = attr_result
                .map_err(|e| Error::Xml(format!("Failed to parse attribute: {}", e)))?;

            let attr_name = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| Error::Xml(format!("Invalid attribute name: {}", e)))?;

            let attr_value = attr
                .unescape_value()
                .map_err(|e| Error::Xml(format!("Failed to unescape attribute value: {}", e)))?
                .to_string();

            if attr_name == "xmlns" {
                element.namespaces.set_default_namespace(&attr_value);
            } else if let Some(prefix) = attr_name.strip_prefix("xmlns:") {
                element.namespaces.add_prefix(prefix, &attr_value);
            } else {
                element.set_attribute(attr_name, attr_value);
            }
        }

        if let Some(ns) = element.namespaces.get_default_namespace() {
            element.qname.namespace = Some(ns.to_string());
        }

        Ok(element)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        let mut schema = Element::xsd("schema");
        schema.namespaces.set_default_namespace(crate::XSD_NAMESPACE);
        schema.namespaces.add_prefix("widget", "urn:widget");
        schema.set_attribute("targetNamespace", "urn:widget");
        let complex = schema.create_xsd_child("complexType");
        complex.set_attribute("name", "widget");
        let element = complex.create_xsd_child("sequence").create_xsd_child("element");
        element.set_attribute("name", "Name");
        element.set_attribute("type", "string");
        Document::with_root(schema)
    }

    #[test]
    fn test_document_creation() {
        let doc = Document::new();
        assert!(doc.root.is_none());
        assert!(!doc.standalone);
    }

    #[test]
    fn test_write_declaration_and_namespaces() {
        let xml = sample().to_xml_string().unwrap();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#));
        assert!(xml.contains(r#"xmlns="http://www.w3.org/2001/XMLSchema""#));
        assert!(xml.contains(r#"xmlns:widget="urn:widget""#));
        assert!(xml.contains(r#"<element name="Name" type="string"/>"#));
    }

    #[test]
    fn test_write_then_parse() {
        let doc = sample();
        let parsed = Document::from_string(&doc.to_xml_string().unwrap()).unwrap();

        assert!(parsed.standalone);
        let root = parsed.root().unwrap();
        assert_eq!(root.local_name(), "schema");
        assert_eq!(root.qname.namespace.as_deref(), Some(crate::XSD_NAMESPACE));
        assert_eq!(root.namespaces.get_namespace("widget"), Some("urn:widget"));

        let element = root.descend(&["complexType", "sequence", "element"]).unwrap();
        assert_eq!(element.get_attribute("name"), Some("Name"));
    }

    #[test]
    fn test_attributes_keep_order_and_escape() {
        let mut elem = Element::xsd("pattern");
        elem.set_attribute("value", "^<a&b>$");
        let doc = Document::with_root(elem);
        let xml = doc.to_xml_string_with_indent(0).unwrap();
        assert!(xml.contains("value=\"^&lt;a&amp;b&gt;$\""));

        let parsed = Document::from_string(&xml).unwrap();
        assert_eq!(parsed.root().unwrap().get_attribute("value"), Some("^<a&b>$"));
    }

    #[test]
    fn test_remove_then_set_attribute() {
        let mut elem = Element::xsd("element");
        elem.set_attribute("name", "Age");
        elem.set_attribute("type", "int");
        elem.set_attribute("minOccurs", "0");
        assert_eq!(elem.remove_attribute("type").as_deref(), Some("int"));
        assert!(!elem.has_attribute("type"));

        let keys: Vec<_> = elem.attributes.keys().cloned().collect();
        assert_eq!(keys, vec!["name", "minOccurs"]);
    }

    #[test]
    fn test_find_children() {
        let xml = r#"<root><child1/><child2/><child1 name="x"/></root>"#;
        let doc = Document::from_string(xml).unwrap();

        let root = doc.root.unwrap();
        assert_eq!(root.find_children("child1").len(), 2);
        assert!(root.find_named("child1", "x").is_some());
        assert!(root.find_named("child2", "x").is_none());
    }
}
