//! Type sanitization: the GraphQL type name emitted for a hop can depend on
//! the hop before it. A to-one relation is named in the singular even when
//! the catalog kind is plural, e.g. a `schools` hop after `student` is emitted
//! as `school`.
//!
//! The built-in rules key on both the singular and the plural predecessor
//! (`student`/`students`, `group`/`groups`), so `schools` is renamed after a
//! hop from the plural built-in catalog as well as after an already
//! singular one.
//!
//! The rule table is data. It can be loaded from YAML:
//!
//! ```yaml
//! student:
//!   schools: school
//! group:
//!   schools: school
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogError;

/// Rename rules keyed by previous resolved type, then by current raw kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SanitizationRules {
    rules: HashMap<String, HashMap<String, String>>,
}

impl Default for SanitizationRules {
    fn default() -> Self {
        let mut rules = SanitizationRules::empty();
        for previous in ["student", "students", "group", "groups"] {
            rules.insert(previous, "schools", "school");
        }
        rules
    }
}

impl SanitizationRules {
    pub fn empty() -> Self {
        SanitizationRules {
            rules: HashMap::new(),
        }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        serde_yaml::from_str(yaml).map_err(|e| CatalogError::ConfigParseError {
            error: format!("sanitization rules: {}", e),
        })
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            CatalogError::ConfigReadError {
                error: format!("{}: {}", path.as_ref().display(), e),
            }
        })?;
        Self::from_yaml_str(&content)
    }

    /// Add (or replace) a rule.
    pub fn insert(
        &mut self,
        previous: impl Into<String>,
        current: impl Into<String>,
        resolved: impl Into<String>,
    ) {
        self.rules
            .entry(previous.into())
            .or_default()
            .insert(current.into(), resolved.into());
    }

    /// Merge `other` on top of these rules; `other` wins on conflicts.
    pub fn extend(&mut self, other: SanitizationRules) {
        for (previous, inner) in other.rules {
            self.rules.entry(previous).or_default().extend(inner);
        }
    }

    /// Resolve the emitted type for `current` following `previous`.
    ///
    /// Total: with no matching rule the raw kind is returned unchanged.
    pub fn sanitize<'a>(&'a self, previous: &str, current: &'a str) -> &'a str {
        self.rules
            .get(previous)
            .and_then(|inner| inner.get(current))
            .map(|s| s.as_str())
            .unwrap_or(current)
    }
}
