//! Result shaper: turns a GraphQL response into something renderable, using
//! the same sanitized path the query was compiled against.
//!
//! # Modes
//!
//! - **Flat**: walk the path from the root collection down to the last hop,
//!   flattening collection segments, then keep each distinct leaf once.
//! - **Nested**: render the root collection recursively, unchanged.
//!
//! A pending or failed fetch renders nothing: [`shape`] returns `None`.

pub mod flat;
pub mod nested;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::catalog::Catalog;
use crate::query_chain::SanitizedPath;

pub use flat::FlatEntry;
pub use nested::{NestedEntry, NestedItem};

/// Tri-state outcome of executing a compiled query.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState {
    #[default]
    Pending,
    Failed,
    /// The `data` object of the response
    Ready(Value),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeMode {
    Flat,
    #[default]
    Nested,
}

impl ShapeMode {
    pub fn toggled(self) -> Self {
        match self {
            ShapeMode::Flat => ShapeMode::Nested,
            ShapeMode::Nested => ShapeMode::Flat,
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
#[error("Unknown shape mode `{0}` (expected `flat` or `nested`)")]
pub struct ShapeModeParseError(String);

impl FromStr for ShapeMode {
    type Err = ShapeModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flat" => Ok(ShapeMode::Flat),
            "nested" => Ok(ShapeMode::Nested),
            _ => Err(ShapeModeParseError(s.to_string())),
        }
    }
}

impl fmt::Display for ShapeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeMode::Flat => f.write_str("flat"),
            ShapeMode::Nested => f.write_str("nested"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "items", rename_all = "lowercase")]
pub enum RenderTree {
    Flat(Vec<FlatEntry>),
    Nested(Vec<NestedItem>),
}

impl RenderTree {
    pub fn len(&self) -> usize {
        match self {
            RenderTree::Flat(entries) => entries.len(),
            RenderTree::Nested(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for RenderTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderTree::Flat(entries) => {
                for entry in entries {
                    writeln!(f, "{}", entry)?;
                }
            }
            RenderTree::Nested(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        writeln!(f, "--")?;
                    }
                    write!(f, "{}", item)?;
                }
            }
        }
        Ok(())
    }
}

/// Leaf values of the flat walk, deduplicated, before display mapping.
pub fn flatten<'a>(data: &'a Value, path: &SanitizedPath, catalog: &Catalog) -> Vec<&'a Value> {
    let Some(root) = path.first() else {
        return Vec::new();
    };
    let elements = flat::root_elements(data.get(&root.resolved_type));
    let walked = flat::walk(elements, &path.segments()[1..], catalog);
    let before = walked.len();
    let unique = flat::dedupe(walked);
    log::debug!(
        "Flattened {} leaf value(s), {} after dedupe",
        before,
        unique.len()
    );
    unique
}

/// Shape a fetch result for display. `None` means render nothing.
pub fn shape(
    fetch: &FetchState,
    path: &SanitizedPath,
    mode: ShapeMode,
    catalog: &Catalog,
) -> Option<RenderTree> {
    let data = match fetch {
        FetchState::Ready(data) => data,
        FetchState::Pending | FetchState::Failed => return None,
    };
    let root = path.first()?;

    let tree = match mode {
        ShapeMode::Flat => RenderTree::Flat(
            flatten(data, path, catalog)
                .into_iter()
                .map(flat::to_entry)
                .collect(),
        ),
        ShapeMode::Nested => RenderTree::Nested(match data.get(&root.resolved_type) {
            None | Some(Value::Null) => Vec::new(),
            Some(collection) => nested::render_collection(collection),
        }),
    };
    Some(tree)
}
