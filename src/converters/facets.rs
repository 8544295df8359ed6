//! Simple type restrictions for enum, string and numeric nodes
//!
//! Each handler switches an element from "typed by name" to "typed inline"
//! when the node carries constraints: the `type` attribute is removed and a
//! `simpleType/restriction` child takes its place.

use crate::documents::Element;
use crate::error::{require, Result};
use crate::locations::SchemaPath;
use rust_decimal::Decimal;
use serde_json::{Number, Value};
use std::fmt;
use std::str::FromStr;

/// Replace the element type with an inline restriction of `base`
fn inline_restriction<'e>(element: &'e mut Element, base: &str) -> &'e mut Element {
    element.remove_attribute("type");
    let restriction = element
        .create_xsd_child("simpleType")
        .create_xsd_child("restriction");
    restriction.set_attribute("base", base);
    restriction
}

fn add_facet(restriction: &mut Element, facet: &str, value: impl Into<String>) {
    restriction
        .create_xsd_child(facet)
        .set_attribute("value", value);
}

/// Emit an enumeration restriction, one facet per value in declaration order
pub fn handle_enum(element: &mut Element, node: &Value, path: &SchemaPath) -> Result<()> {
    let values = require(
        node.get("enum").and_then(Value::as_array),
        "enum must be an array",
        path.join("enum").as_str(),
    )?;

    let restriction = inline_restriction(element, "string");
    for value in values {
        let text = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        add_facet(restriction, "enumeration", text);
    }
    Ok(())
}

/// Apply the facets relevant to a built-in simple type, if any
pub fn handle_simple(
    element: &mut Element,
    xsd_type: &str,
    node: &Value,
    path: &SchemaPath,
) -> Result<()> {
    match xsd_type {
        "string" => handle_string(element, node, path),
        "decimal" | "int" => handle_number(element, xsd_type, node, path),
        _ => Ok(()),
    }
}

fn handle_string(element: &mut Element, node: &Value, path: &SchemaPath) -> Result<()> {
    let min_length = length(node, "minLength", path)?;
    let max_length = length(node, "maxLength", path)?;
    let pattern = match node.get("pattern") {
        None => None,
        Some(pattern) => Some(require(
            pattern.as_str(),
            "pattern must be a string",
            path.join("pattern").as_str(),
        )?),
    };

    if min_length.is_none() && max_length.is_none() && pattern.is_none() {
        return Ok(());
    }

    let restriction = inline_restriction(element, "string");
    if let Some(min) = min_length {
        add_facet(restriction, "minLength", min.to_string());
    }
    if let Some(max) = max_length {
        add_facet(restriction, "maxLength", max.to_string());
    }
    if let Some(pattern) = pattern {
        add_facet(restriction, "pattern", pattern);
    }
    Ok(())
}

fn handle_number(
    element: &mut Element,
    xsd_type: &str,
    node: &Value,
    path: &SchemaPath,
) -> Result<()> {
    let minimum = bound(node, "minimum", path)?;
    let maximum = bound(node, "maximum", path)?;

    if minimum.is_none() && maximum.is_none() {
        return Ok(());
    }

    // Inclusive integer bounds must stay inside the declared range
    let (min_rounding, max_rounding) = if xsd_type == "int" {
        (Rounding::Ceil, Rounding::Floor)
    } else {
        (Rounding::Exact, Rounding::Exact)
    };
    let restriction = inline_restriction(element, xsd_type);
    if let Some(min) = minimum {
        add_facet(restriction, "minInclusive", facet_value(min, min_rounding));
    }
    if let Some(max) = maximum {
        add_facet(restriction, "maxInclusive", facet_value(max, max_rounding));
    }
    Ok(())
}

fn length(node: &Value, key: &str, path: &SchemaPath) -> Result<Option<u64>> {
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

fn bound<'n>(node: &'n Value, key: &str, path: &SchemaPath) -> Result<Option<&'n Number>> {
    let Some(value) = node.get(key) else {
        return Ok(None);
    };
    require(
        value.as_number(),
        format!("{} must be a number", key),
        path.join(key).as_str(),
    )
    .map(Some)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rounding {
    Exact,
    Ceil,
    Floor,
}

/// Plain decimal text of a bound, rounded to an integer unless `Exact`
fn facet_value(number: &Number, rounding: Rounding) -> String {
    let text = number.to_string();
    match Decimal::from_str(&text).or_else(|_| Decimal::from_scientific(&text)) {
        Ok(decimal) => {
            let decimal = match rounding {
                Rounding::Exact => decimal,
                Rounding::Ceil => decimal.ceil(),
                Rounding::Floor => decimal.floor(),
            };
            decimal.normalize().to_string()
        }
        // Outside the range or precision of Decimal
        Err(_) => match PlainNumber::parse(&text) {
            Some(plain) => plain.round(rounding).to_string(),
            None => text,
        },
    }
}

/// A number in positional notation, as sign, integer digits and fraction digits
#[derive(Debug, PartialEq, Eq)]
struct PlainNumber {
    negative: bool,
    integer: String,
    fraction: String,
}

impl PlainNumber {
    /// Expand JSON number text such as `-1.5e-30` into positional digits
    fn parse(text: &str) -> Option<Self> {
        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let (mantissa, exponent) = match unsigned.find(|c: char| c == 'e' || c == 'E') {
            Some(at) => (&unsigned[..at], unsigned[at + 1..].parse::<i64>().ok()?),
            None => (unsigned, 0),
        };
        let (integer, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        let all_digits = integer.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit());
        if integer.is_empty() || !all_digits {
            return None;
        }

        let digits = format!("{}{}", integer, fraction);
        let point = integer.len() as i64 + exponent;
        let (integer, fraction) = if point <= 0 {
            (String::new(), "0".repeat(point.unsigned_abs() as usize) + &digits)
        } else if point as usize >= digits.len() {
            (digits.clone() + &"0".repeat(point as usize - digits.len()), String::new())
        } else {
            let (head, tail) = digits.split_at(point as usize);
            (head.to_string(), tail.to_string())
        };

        let integer = integer.trim_start_matches('0');
        Some(Self {
            negative,
            integer: if integer.is_empty() { "0".to_string() } else { integer.to_string() },
            fraction: fraction.trim_end_matches('0').to_string(),
        })
    }

    fn round(mut self, rounding: Rounding) -> Self {
        if rounding == Rounding::Exact || self.fraction.is_empty() {
            return self;
        }
        self.fraction.clear();
        // Away from zero for a positive ceiling or a negative floor
        if (rounding == Rounding::Ceil) != self.negative {
            self.integer = increment(&self.integer);
        }
        self
    }
}

impl fmt::Display for PlainNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let zero = self.integer == "0" && self.fraction.is_empty();
        if self.negative && !zero {
            write!(f, "-")?;
        }
        write!(f, "{}", self.integer)?;
        if !self.fraction.is_empty() {
            write!(f, ".{}", self.fraction)?;
        }
        Ok(())
    }
}

/// Add one to a string of decimal digits
fn increment(digits: &str) -> String {
    let mut out: Vec<char> = digits.chars().collect();
    for digit in out.iter_mut().rev() {
        match digit.to_digit(10) {
            Some(9) => *digit = '0',
            Some(d) => {
                *digit = char::from_digit(d + 1, 10).unwrap_or('0');
                return out.into_iter().collect();
            }
            None => {}
        }
    }
    std::iter::once('1').chain(out).collect()
}
