//! Entity catalog: for each entity kind, the fields a hop may select and the
//! fields it may filter on.
//!
//! The lists are fixed once the catalog is built. A kind must be present here
//! before a hop of that kind can be appended to a chain.

pub mod config;
pub mod entity_kind;
pub mod errors;

use std::collections::HashMap;
use std::path::Path;

pub use config::{CatalogConfig, EntityConfig};
pub use entity_kind::EntityKind;
pub use errors::CatalogError;

/// Selectable and filterable fields of one entity kind
#[derive(Debug, Clone, PartialEq)]
pub struct EntityDefinition {
    pub kind: EntityKind,
    /// Selectable field names, in catalog order
    pub fields: Vec<String>,
    /// Filterable field names, in catalog order
    pub filters: Vec<String>,
    /// Whether the kind names a plural collection in responses
    pub collection: bool,
}

// kind, fields, filters
type BuiltinEntity = (&'static str, &'static [&'static str], &'static [&'static str]);

lazy_static::lazy_static! {
    static ref BUILTIN_ENTITIES: Vec<BuiltinEntity> = vec![
        ("schools", &["id", "name"], &["id", "name"]),
        ("groups", &["id", "name"], &["id", "name"]),
        (
            "teachers",
            &["id", "firstName", "lastName", "userName"],
            &["id", "firstName", "lastName", "userName"],
        ),
        (
            "students",
            &["id", "firstName", "lastName", "userName"],
            &["id", "firstName", "lastName", "userName"],
        ),
    ];
}

/// Lookup table from entity kind to its definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    entities: HashMap<EntityKind, EntityDefinition>,
    /// Kinds in registration order (menu order)
    order: Vec<EntityKind>,
}

impl Default for Catalog {
    /// The school catalog: schools, groups, teachers, students.
    fn default() -> Self {
        let mut catalog = Catalog::empty();
        for (kind, fields, filters) in BUILTIN_ENTITIES.iter() {
            catalog.insert(EntityDefinition {
                kind: EntityKind::from(*kind),
                fields: fields.iter().map(|f| f.to_string()).collect(),
                filters: filters.iter().map(|f| f.to_string()).collect(),
                collection: true,
            });
        }
        catalog
    }
}

impl Catalog {
    pub fn empty() -> Self {
        Catalog {
            entities: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Load, validate and build a catalog from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let catalog = CatalogConfig::from_yaml_file(path)?.into_catalog()?;
        log::debug!("Loaded catalog with kinds: {:?}", catalog.order);
        Ok(catalog)
    }

    /// Register (or replace) an entity definition.
    pub fn insert(&mut self, definition: EntityDefinition) {
        if !self.entities.contains_key(&definition.kind) {
            self.order.push(definition.kind.clone());
        }
        self.entities.insert(definition.kind.clone(), definition);
    }

    pub fn entity(&self, kind: &EntityKind) -> Result<&EntityDefinition, CatalogError> {
        self.entities
            .get(kind)
            .ok_or_else(|| CatalogError::UnknownKind {
                kind: kind.to_string(),
            })
    }

    pub fn fields(&self, kind: &EntityKind) -> Result<&[String], CatalogError> {
        Ok(&self.entity(kind)?.fields)
    }

    pub fn filters(&self, kind: &EntityKind) -> Result<&[String], CatalogError> {
        Ok(&self.entity(kind)?.filters)
    }

    pub fn contains(&self, kind: &EntityKind) -> bool {
        self.entities.contains_key(kind)
    }

    /// All kinds, in registration order.
    pub fn kinds(&self) -> impl Iterator<Item = &EntityKind> {
        self.order.iter()
    }

    /// Whether a resolved GraphQL type name denotes a plural collection.
    ///
    /// Sanitized singular names (e.g. `school`) are not catalog kinds and
    /// therefore never collections.
    pub fn is_collection(&self, type_name: &str) -> bool {
        self.entities
            .get(&EntityKind::from(type_name))
            .is_some_and(|e| e.collection)
    }
}
