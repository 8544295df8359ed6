//! Named complex types for the root `definitions`

use super::properties::{convert_properties, required_names};
use super::ConversionContext;
use crate::documents::Element;
use crate::error::{require, Result};
use crate::locations::SchemaPath;
use serde_json::Value;

/// Attributes of the HAL link type, all typed `string`
const LINK_ATTRIBUTES: [&str; 5] = ["href", "rel", "title", "method", "type"];

/// Emit one top-level complex type per definition
pub(crate) fn emit_definitions(
    schema_root: &mut Element,
    schema: &Value,
    ctx: &mut ConversionContext<'_>,
) -> Result<()> {
    let Some(definitions) = schema.get("definitions") else {
        return Ok(());
    };
    let path = SchemaPath::root().join("definitions");
    let definitions = require(
        definitions.as_object(),
        "\"definitions\" must be an object",
        path.as_str(),
    )?;

    for (key, definition) in definitions {
        if ctx.config.is_link_type(key) {
            tracing::debug!("emitting link type '{}'", key);
            emit_link_type(schema_root, key);
            continue;
        }

        let definition_path = path.join(key);
        let properties_path = definition_path.join("properties");
        let properties = require(
            definition.get("properties").and_then(Value::as_object),
            format!("\"properties\" property should be found in \"{}\"", key),
            properties_path.as_str(),
        )?;
        let required = required_names(definition, &definition_path)?;

        tracing::debug!("emitting complex type '{}'", key);
        let complex_type = schema_root.create_xsd_child("complexType");
        complex_type.set_attribute("name", key);
        let sequence = complex_type.create_xsd_child("sequence");
        convert_properties(sequence, properties, &required, &properties_path, ctx)?;
    }
    Ok(())
}

fn emit_link_type(schema_root: &mut Element, name: &str) {
    let complex_type = schema_root.create_xsd_child("complexType");
    complex_type.set_attribute("name", name);
    for attribute_name in LINK_ATTRIBUTES {
        let attribute = complex_type.create_xsd_child("attribute");
        attribute.set_attribute("name", attribute_name);
        attribute.set_attribute("type", "string");
    }
}
