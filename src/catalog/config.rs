use super::entity_kind::validate_graphql_name;
use super::errors::CatalogError;
use super::{Catalog, EntityDefinition};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Entity catalogs are defined in YAML with the following structure:
///
/// ```yaml
/// entities:
///   - kind: schools          # Raw kind, also the root collection name
///     fields: [id, name]     # Selectable fields, in display order
///     filters: [id, name]    # Filterable fields, in display order
///     collection: true       # Optional, defaults to true
///   - kind: students
///     fields: [id, firstName, lastName, userName]
///     filters: [id, firstName, lastName, userName]
/// ```
///
/// `filters` may be omitted, in which case every field is filterable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub entities: Vec<EntityConfig>,
}

/// One entity entry in a catalog config
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntityConfig {
    pub kind: String,
    pub fields: Vec<String>,
    #[serde(default)]
    pub filters: Option<Vec<String>>,
    /// Whether the kind names a plural collection (flattened when shaping).
    #[serde(default = "default_collection")]
    pub collection: bool,
}

fn default_collection() -> bool {
    true
}

impl CatalogConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        serde_yaml::from_str(yaml).map_err(|e| CatalogError::ConfigParseError {
            error: e.to_string(),
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

    /// Structural validation: names follow the GraphQL grammar, kinds are
    /// unique, and no field or filter is listed twice for one kind.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut kinds = HashSet::new();
        for entity in &self.entities {
            validate_graphql_name(&entity.kind, "entity kind")?;
            if !kinds.insert(entity.kind.as_str()) {
                return Err(CatalogError::DuplicateKind {
                    kind: entity.kind.clone(),
                });
            }

            let mut seen = HashSet::new();
            for field in &entity.fields {
                validate_graphql_name(field, "field")?;
                if !seen.insert(field.as_str()) {
                    return Err(CatalogError::DuplicateField {
                        kind: entity.kind.clone(),
                        field: field.clone(),
                    });
                }
            }

            let mut seen = HashSet::new();
            for filter in entity.filters.iter().flatten() {
                validate_graphql_name(filter, "filter")?;
                if !seen.insert(filter.as_str()) {
                    return Err(CatalogError::DuplicateFilter {
                        kind: entity.kind.clone(),
                        filter: filter.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Validate and build the runtime catalog.
    pub fn into_catalog(self) -> Result<Catalog, CatalogError> {
        self.validate()?;
        let mut catalog = Catalog::empty();
        for entity in self.entities {
            let filters = entity.filters.unwrap_or_else(|| entity.fields.clone());
            catalog.insert(EntityDefinition {
                kind: entity.kind.into(),
                fields: entity.fields,
                filters,
                collection: entity.collection,
            });
        }
        Ok(catalog)
    }
}
