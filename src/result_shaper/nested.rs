//! Nested mode: the response tree rendered as-is, one "More" section per
//! nested object or list.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Schema metadata property skipped when rendering.
pub const TYPENAME: &str = "__typename";

/// Label of a collapsible nested section.
pub const MORE: &str = "More";

/// Rendered properties of one response object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NestedItem {
    pub entries: Vec<NestedEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NestedEntry {
    /// Scalar property, shown as `key - value`
    Leaf { key: String, value: String },
    /// Object or list property, shown as a collapsible section
    Branch { key: String, items: Vec<NestedItem> },
}

/// Render every element of a collection. A bare object counts as a
/// collection of one.
pub fn render_collection(value: &Value) -> Vec<NestedItem> {
    match value {
        Value::Array(items) => items.iter().map(render_item).collect(),
        other => vec![render_item(other)],
    }
}

fn render_item(item: &Value) -> NestedItem {
    let entries = match item {
        Value::Object(map) => map
            .iter()
            .filter(|(key, _)| key.as_str() != TYPENAME)
            .map(|(key, value)| render_property(key, value))
            .collect(),
        scalar => vec![NestedEntry::Leaf {
            key: String::new(),
            value: scalar_text(scalar),
        }],
    };
    NestedItem { entries }
}

fn render_property(key: &str, value: &Value) -> NestedEntry {
    match value {
        Value::Array(_) | Value::Object(_) => NestedEntry::Branch {
            key: key.to_string(),
            items: render_collection(value),
        },
        scalar => NestedEntry::Leaf {
            key: key.to_string(),
            value: scalar_text(scalar),
        },
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl NestedItem {
    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let pad = "  ".repeat(depth);
        for entry in &self.entries {
            match entry {
                NestedEntry::Leaf { key, value } if key.is_empty() => {
                    writeln!(f, "{}{}", pad, value)?
                }
                NestedEntry::Leaf { key, value } => writeln!(f, "{}{} - {}", pad, key, value)?,
                NestedEntry::Branch { key, items } => {
                    writeln!(f, "{}{} ({})", pad, key, MORE)?;
                    for item in items {
                        item.write_indented(f, depth + 1)?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for NestedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}
