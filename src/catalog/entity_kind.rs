use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::errors::CatalogError;

/// GraphQL `Name` grammar: `/[_A-Za-z][_0-9A-Za-z]*/`
static GRAPHQL_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[_A-Za-z][_0-9A-Za-z]*$").unwrap());

/// Check a kind, field or filter name against the GraphQL name grammar.
pub fn validate_graphql_name(name: &str, what: &str) -> Result<(), CatalogError> {
    if GRAPHQL_NAME.is_match(name) {
        Ok(())
    } else {
        Err(CatalogError::InvalidName {
            name: name.to_string(),
            what: what.to_string(),
        })
    }
}

/// Tag naming one entity kind of the catalog (e.g. `schools`, `students`).
///
/// The raw kind is what the user picks when appending a hop. The GraphQL type
/// actually emitted for the hop may differ, see
/// [`crate::query_chain::sanitizer`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityKind(String);

impl EntityKind {
    pub fn new(kind: impl Into<String>) -> Self {
        EntityKind(kind.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityKind {
    fn from(s: &str) -> Self {
        EntityKind(s.to_string())
    }
}

impl From<String> for EntityKind {
    fn from(s: String) -> Self {
        EntityKind(s)
    }
}

impl AsRef<str> for EntityKind {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
