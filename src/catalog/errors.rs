//! # Catalog Error Types
//!
//! Errors raised while loading an entity catalog or looking up a kind in it.
//!
//! Lookups of a kind that was never registered surface as
//! [`CatalogError::UnknownKind`]; callers add their own context with
//! [`CatalogError::unknown_kind_with_context`].

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("No catalog entry found for entity kind `{kind}`")]
    UnknownKind { kind: String },
    #[error("Entity kind `{kind}` is defined more than once")]
    DuplicateKind { kind: String },
    #[error("Invalid GraphQL name `{name}` ({what})")]
    InvalidName { name: String, what: String },
    #[error("Filter `{filter}` of kind `{kind}` is listed more than once")]
    DuplicateFilter { kind: String, filter: String },
    #[error("Field `{field}` of kind `{kind}` is listed more than once")]
    DuplicateField { kind: String, field: String },
    #[error("Failed to read catalog file: {error}")]
    ConfigReadError { error: String },
    #[error("Failed to parse catalog: {error}")]
    ConfigParseError { error: String },
}

impl CatalogError {
    /// Create an UnknownKind error with context information
    ///
    /// # Example
    /// ```ignore
    /// CatalogError::unknown_kind_with_context("clubs", "While appending a hop")
    /// ```
    pub fn unknown_kind_with_context(kind: impl Into<String>, context: impl Into<String>) -> Self {
        CatalogError::UnknownKind {
            kind: format!("{}\n  Context: {}", kind.into(), context.into()),
        }
    }
}
