//! Name transformation and XML name validation
//!
//! JSON property keys become XSD element names and the root name becomes the
//! name of the generated complex type (and, lowercased, the namespace prefix).

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Convert a JSON property key to an element name.
///
/// The first character is uppercased, except for keys listed in `verbatim`
/// (by default the HAL `link` key), which are kept as they are.
pub fn to_element_name(key: &str, verbatim: &[String]) -> String {
    if verbatim.iter().any(|v| v == key) {
        return key.to_string();
    }
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Convert a root name to the complex type name.
///
/// The first character is lowercased unless the second one is already
/// uppercase, so acronym-like names (`ABCFoo`) are left alone while `Foo`
/// becomes `foo`. Single-character names are lowercased.
pub fn to_root_name(name: &str) -> String {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let rest = chars.as_str();
    if rest.chars().next().is_some_and(char::is_uppercase) {
        return name.to_string();
    }
    first.to_lowercase().chain(rest.chars()).collect()
}

/// Remove all whitespace from a string
pub fn strip_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, "").into_owned()
}

/// Check if a string is a valid XML Name
pub fn is_valid_name(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }

    name.chars()
        .next()
        .map(|c| c.is_alphabetic() || c == '_')
        .unwrap_or(false)
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == '.')
}

/// Check if a string is a valid NCName (non-colonized name)
pub fn is_valid_ncname(name: &str) -> bool {
    if name.is_empty() || name.contains(':') {
        return false;
    }

    // NCName is a Name without colons
    is_valid_name(name)
}

/// Validate an NCName and return an error if invalid
pub fn validate_ncname(name: &str) -> Result<()> {
    if is_valid_ncname(name) {
        Ok(())
    } else {
        Err(Error::Name(format!("Invalid NCName: '{}'", name)))
    }
}
