//! Recursive conversion of schema properties into element declarations
//!
//! Every property becomes exactly one `element` appended to the enclosing
//! `sequence` or `choice`. Objects and arrays recurse; references are never
//! expanded, only renamed into the target namespace.

use super::facets;
use super::types::{classify, SchemaKind};
use super::{ConversionContext, NoticeKind};
use crate::documents::Element;
use crate::error::{ensure, require, Result, StructureError};
use crate::locations::SchemaPath;
use crate::names;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Names listed in a node's `required` array
pub fn required_names(node: &Value, path: &SchemaPath) -> Result<HashSet<String>> {
    let Some(required) = node.get("required") else {
        return Ok(HashSet::new());
    };
    let required_path = path.join("required");
    let entries = require(
        required.as_array(),
        "required must have type: string array",
        required_path.as_str(),
    )?;
    entries
        .iter()
        .map(|entry| {
            require(
                entry.as_str().map(str::to_string),
                "required must be string",
                required_path.as_str(),
            )
        })
        .collect()
}

/// Convert every member of a `properties` map into `group`
pub(crate) fn convert_properties(
    group: &mut Element,
    properties: &Map<String, Value>,
    required: &HashSet<String>,
    path: &SchemaPath,
    ctx: &mut ConversionContext<'_>,
) -> Result<()> {
    for (key, node) in properties {
        convert_property(key, node, group, required.contains(key), &path.join(key), ctx)?;
    }
    Ok(())
}

/// Convert one property, naming the element after its key
pub(crate) fn convert_property(
    key: &str,
    node: &Value,
    group: &mut Element,
    is_required: bool,
    path: &SchemaPath,
    ctx: &mut ConversionContext<'_>,
) -> Result<()> {
    let name = names::to_element_name(key, &ctx.verbatim_keys);
    convert_named(name, node, group, is_required, path, ctx)
}

fn convert_named(
    name: String,
    node: &Value,
    group: &mut Element,
    is_required: bool,
    path: &SchemaPath,
    ctx: &mut ConversionContext<'_>,
) -> Result<()> {
    ctx.config.limits().check_schema_depth(path.depth())?;
    let kind = classify(node, path)?;
    tracing::trace!("{} -> {} ({})", path, name, kind.token());

    let mut element = Element::xsd("element");
    element.set_attribute("name", name);
    if let SchemaKind::Simple(xsd_type) = kind {
        element.set_attribute("type", xsd_type);
    }
    if !is_required {
        element.set_attribute("minOccurs", "0");
    }

    match kind {
        SchemaKind::Reference => handle_reference(&mut element, node, path, ctx)?,
        SchemaKind::Enum => facets::handle_enum(&mut element, node, path)?,
        SchemaKind::Object => handle_object(&mut element, node, path, ctx)?,
        SchemaKind::Array => handle_array(&mut element, node, path, ctx)?,
        SchemaKind::Simple(xsd_type) => facets::handle_simple(&mut element, xsd_type, node, path)?,
    }

    group.add_child(element);
    Ok(())
}

fn handle_reference(
    element: &mut Element,
    node: &Value,
    path: &SchemaPath,
    ctx: &ConversionContext<'_>,
) -> Result<()> {
    let ref_path = path.join("$ref");
    let reference = require(
        node.get("$ref").and_then(Value::as_str),
        "$ref must be a string",
        ref_path.as_str(),
    )?;
    let target = reference.replace("#/definitions/", "");
    ensure(!target.is_empty(), "$ref must name a definition", ref_path.as_str())?;

    element.remove_attribute("type");
    if element.get_attribute("name").map_or(true, str::is_empty) {
        element.set_attribute("name", target.as_str());
    }
    element.set_attribute("type", ctx.qualify(&target));
    Ok(())
}

fn handle_object(
    element: &mut Element,
    node: &Value,
    path: &SchemaPath,
    ctx: &mut ConversionContext<'_>,
) -> Result<()> {
    if let Some(branches) = node.get("oneOf") {
        return handle_one_of(element, branches, &path.join("oneOf"), ctx);
    }

    let sequence = element
        .create_xsd_child("complexType")
        .create_xsd_child("sequence");
    let Some(properties) = node.get("properties") else {
        return Ok(());
    };
    let properties_path = path.join("properties");
    let properties = require(
        properties.as_object(),
        "'object' type must have a 'properties' object",
        properties_path.as_str(),
    )?;
    let required = required_names(node, path)?;
    convert_properties(sequence, properties, &required, &properties_path, ctx)
}

/// Emulate `oneOf` with a choice of synthesized, required elements
fn handle_one_of(
    element: &mut Element,
    branches: &Value,
    path: &SchemaPath,
    ctx: &mut ConversionContext<'_>,
) -> Result<()> {
    let choice = element
        .create_xsd_child("complexType")
        .create_xsd_child("sequence")
        .create_xsd_child("choice");

    let Some(branches) = branches.as_array() else {
        ctx.notice(
            NoticeKind::MalformedOneOf,
            path,
            format!("Malformed 'oneOf' clause, expected an array: {}", branches),
        );
        return Ok(());
    };

    for (index, branch) in branches.iter().enumerate() {
        let branch_path = path.join(index);
        if !branch.is_object() {
            ctx.notice(
                NoticeKind::SkippedChoiceBranch,
                &branch_path,
                format!("Skipping 'oneOf' branch that is not a schema: {}", branch),
            );
            continue;
        }
        let name = synthesized_name(branch, || format!("dummyElement{}", index + 1));
        ctx.review_name(
            NoticeKind::SynthesizedChoiceName,
            &branch_path,
            &name,
            "inside 'oneOf'",
        );
        convert_named(name, branch, choice, true, &branch_path, ctx)?;
    }
    Ok(())
}

fn handle_array(
    element: &mut Element,
    node: &Value,
    path: &SchemaPath,
    ctx: &mut ConversionContext<'_>,
) -> Result<()> {
    let items_path = path.join("items");
    let items = node.get("items").ok_or_else(|| {
        StructureError::new("array type must have an 'items' schema").with_path(path.to_string())
    })?;
    ensure(
        items.is_object(),
        "'items' must be a single schema object",
        items_path.as_str(),
    )?;
    ctx.config.limits().check_schema_depth(items_path.depth())?;
    let kind = classify(items, &items_path)?;
    let min_items = occurs(node, "minItems", path)?;
    let max_items = occurs(node, "maxItems", path)?;
    if let (Some(min), Some(max)) = (min_items, max_items) {
        ensure(
            min <= max,
            format!("minItems {} exceeds maxItems {}", min, max),
            path.as_str(),
        )?;
    }
    let container_name = element.get_attribute("name").unwrap_or_default().to_string();

    let item = element
        .create_xsd_child("complexType")
        .create_xsd_child("sequence")
        .create_xsd_child("element");
    match kind {
        SchemaKind::Reference => handle_reference(item, items, &items_path, ctx)?,
        SchemaKind::Object => {
            handle_object(item, items, &items_path, ctx)?;
            item.set_attribute("name", "item");
        }
        SchemaKind::Enum => {
            item.set_attribute("name", "item");
            facets::handle_enum(item, items, &items_path)?;
        }
        SchemaKind::Array => {
            item.set_attribute("name", "item");
            handle_array(item, items, &items_path, ctx)?;
        }
        SchemaKind::Simple(xsd_type) => {
            item.set_attribute("name", "item");
            item.set_attribute("type", xsd_type);
            facets::handle_simple(item, xsd_type, items, &items_path)?;
        }
    }

    item.set_attribute(
        "minOccurs",
        min_items.map_or_else(|| "0".to_string(), |n| n.to_string()),
    );
    item.set_attribute(
        "maxOccurs",
        max_items.map_or_else(|| "unbounded".to_string(), |n| n.to_string()),
    );

    if min_items.is_some() || max_items.is_some() {
        let name = synthesized_name(items, || format!("dummyArrayElement_{}", container_name));
        ctx.review_name(
            NoticeKind::SynthesizedArrayItemName,
            &items_path,
            &name,
            "inside 'array'",
        );
        item.set_attribute("name", name);
    }
    Ok(())
}

fn occurs(node: &Value, key: &str, path: &SchemaPath) -> Result<Option<u64>> {
    match node.get(key) {
        None => Ok(None),
        Some(value) => require(
            value.as_u64(),
            format!("{} must be a non-negative integer", key),
            path.join(key).as_str(),
        )
        .map(Some),
    }
}

/// Element name from a node's `description`, or a numbered fallback
fn synthesized_name(node: &Value, fallback: impl FnOnce() -> String) -> String {
    node.get("description")
        .and_then(Value::as_str)
        .map(names::strip_whitespace)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(fallback)
}
