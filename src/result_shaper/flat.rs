//! Flat mode: walk the sanitized path through the response, flattening
//! collection segments, and keep each distinct leaf once.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::catalog::Catalog;
use crate::query_chain::PathSegment;

pub const NO_ADDITIONAL_INFO: &str = "no additional info";

/// One line of the flat list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatEntry {
    pub primary: String,
    pub secondary: String,
}

impl fmt::Display for FlatEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n  {}", self.primary, self.secondary)
    }
}

/// Elements of the root collection: an array's items, or a lone object.
pub fn root_elements(root: Option<&Value>) -> Vec<&Value> {
    match root {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => vec![other],
    }
}

/// Project the working collection through each remaining segment.
///
/// Collection segments are flattened one level; any other segment maps each
/// element to its property one-to-one. Elements lacking the property (or
/// holding `null`) drop out.
pub fn walk<'a>(
    elements: Vec<&'a Value>,
    segments: &[PathSegment],
    catalog: &Catalog,
) -> Vec<&'a Value> {
    segments.iter().fold(elements, |working, segment| {
        let name = segment.resolved_type.as_str();
        let flatten = catalog.is_collection(name);
        let mut next = Vec::new();
        for element in working {
            match element.get(name) {
                None | Some(Value::Null) => {}
                Some(Value::Array(items)) if flatten => next.extend(items.iter()),
                Some(value) => next.push(value),
            }
        }
        next
    })
}

/// Keep the first occurrence of each value, compared by deep equality.
pub fn dedupe<'a>(values: Vec<&'a Value>) -> Vec<&'a Value> {
    let mut seen = HashSet::with_capacity(values.len());
    let mut unique: Vec<&Value> = Vec::with_capacity(values.len());
    for value in values {
        if seen.insert(canonical_key(value)) {
            unique.push(value);
        }
    }
    unique
}

/// Serialized form of a value with object keys sorted, so two values share
/// a key exactly when they are deeply equal.
fn canonical_key(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::from(key.as_str()).to_string());
                out.push(':');
                write_canonical(item, out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Display name and secondary line of a leaf.
pub fn to_entry(value: &Value) -> FlatEntry {
    if !value.is_object() {
        return FlatEntry {
            primary: text(Some(value)).unwrap_or_default(),
            secondary: NO_ADDITIONAL_INFO.to_string(),
        };
    }

    let primary = text(value.get("name"))
        .or_else(|| text(value.get("userName")))
        .unwrap_or_default();
    let parts: Vec<String> = [value.get("firstName"), value.get("lastName")]
        .into_iter()
        .filter_map(text)
        .collect();
    let secondary = if parts.is_empty() {
        NO_ADDITIONAL_INFO.to_string()
    } else {
        parts.join(" ")
    };

    FlatEntry { primary, secondary }
}
