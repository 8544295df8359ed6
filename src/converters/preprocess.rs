//! Schema normalization before conversion

use serde_json::{Map, Value};

/// Keys that carry no XSD meaning when set to `false`
const FALSE_MARKERS: [&str; 2] = ["additionalProperties", "additionalItems"];

/// Normalize a parsed schema.
///
/// A root with `definitions` but no `properties` is turned into an object
/// schema whose properties are the former definitions. Every
/// `"additionalProperties": false` and `"additionalItems": false` member is
/// removed from the whole tree.
pub fn normalize(mut schema: Value) -> Value {
    if let Value::Object(root) = &mut schema {
        if !root.contains_key("properties") {
            if let Some(definitions) = root.remove("definitions") {
                tracing::debug!("folding root definitions into properties");
                root.insert("properties".to_string(), definitions);
                root.insert("type".to_string(), Value::String("object".to_string()));
            }
        }
    }
    strip_false_markers(&mut schema);
    schema
}

fn is_false_marker(key: &str, value: &Value) -> bool {
    value == &Value::Bool(false) && FALSE_MARKERS.contains(&key)
}

fn strip_false_markers(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if map.iter().any(|(k, v)| is_false_marker(k, v)) {
                // Rebuild rather than remove, so member order is kept
                *map = std::mem::take(map)
                    .into_iter()
                    .filter(|(k, v)| !is_false_marker(k, v))
                    .collect::<Map<String, Value>>();
            }
            map.values_mut().for_each(strip_false_markers);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_false_markers),
        _ => {}
    }
}
