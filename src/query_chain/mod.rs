//! The query chain: an ordered sequence of hops plus the per-hop field and
//! filter state.
//!
//! A `QueryChain` is an immutable value. Every transition (`add_hop`,
//! `remove_hop`, `toggle_field`, `set_filter`) returns a new chain and leaves
//! the receiver untouched, so the compiler and shaper only ever see snapshots.
//!
//! Hop order is traversal order: the first hop is the outermost selection.

pub mod errors;
pub mod hop;
pub mod path;
pub mod sanitizer;

use std::collections::HashMap;

use crate::catalog::{Catalog, CatalogError, EntityKind};

pub use errors::ChainError;
pub use hop::{FieldSelection, FilterValues, Hop, HopId};
pub use path::{resolve_path, PathSegment, SanitizedPath};
pub use sanitizer::SanitizationRules;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryChain {
    hops: Vec<Hop>,
    fields: HashMap<HopId, FieldSelection>,
    filters: HashMap<HopId, FilterValues>,
}

impl QueryChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hops(&self) -> &[Hop] {
        &self.hops
    }

    pub fn len(&self) -> usize {
        self.hops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }

    pub fn last(&self) -> Option<&Hop> {
        self.hops.last()
    }

    pub fn hop(&self, id: HopId) -> Option<&Hop> {
        self.hops.iter().find(|h| h.id == id)
    }

    pub fn fields(&self, id: HopId) -> Option<&FieldSelection> {
        self.fields.get(&id)
    }

    pub fn filters(&self, id: HopId) -> Option<&FilterValues> {
        self.filters.get(&id)
    }

    /// Sanitized type sequence of the current hops.
    pub fn resolve_path(&self, rules: &SanitizationRules) -> SanitizedPath {
        path::resolve_path(&self.hops, rules)
    }

    /// Append a hop of `kind` with a fresh id, every field included and
    /// every filter blank.
    pub fn add_hop(&self, catalog: &Catalog, kind: &EntityKind) -> Result<Self, ChainError> {
        self.add_hop_with_id(catalog, kind, HopId::new())
    }

    /// Append a hop under a caller-generated id.
    pub fn add_hop_with_id(
        &self,
        catalog: &Catalog,
        kind: &EntityKind,
        id: HopId,
    ) -> Result<Self, ChainError> {
        if self.hop(id).is_some() {
            return Err(ChainError::DuplicateHop(id));
        }
        let entity = catalog.entity(kind).map_err(|_| {
            CatalogError::unknown_kind_with_context(kind.as_str(), "While appending a hop")
        })?;

        let mut next = self.clone();
        next.hops.push(Hop {
            id,
            kind: kind.clone(),
        });
        next.fields
            .insert(id, FieldSelection::all_included(&entity.fields));
        next.filters.insert(id, FilterValues::blank(&entity.filters));

        log::debug!("Appended hop {} ({}) at depth {}", id, kind, next.hops.len());
        Ok(next)
    }

    /// Drop a hop together with its field and filter state.
    pub fn remove_hop(&self, id: HopId) -> Result<Self, ChainError> {
        if self.hop(id).is_none() {
            return Err(ChainError::UnknownHop(id));
        }

        let mut next = self.clone();
        next.hops.retain(|h| h.id != id);
        next.fields.remove(&id);
        next.filters.remove(&id);
        Ok(next)
    }

    pub fn toggle_field(&self, id: HopId, field: &str) -> Result<Self, ChainError> {
        let current = self.fields.get(&id).ok_or(ChainError::UnknownHop(id))?;
        let toggled = current
            .toggled(field)
            .ok_or_else(|| ChainError::UnknownField {
                hop: id,
                field: field.to_string(),
            })?;

        let mut next = self.clone();
        next.fields.insert(id, toggled);
        Ok(next)
    }

    /// Set a filter value. An empty value switches the filter off.
    pub fn set_filter(&self, id: HopId, filter: &str, value: &str) -> Result<Self, ChainError> {
        let current = self.filters.get(&id).ok_or(ChainError::UnknownHop(id))?;
        let updated = current
            .with_value(filter, value)
            .ok_or_else(|| ChainError::UnknownFilter {
                hop: id,
                filter: filter.to_string(),
            })?;

        let mut next = self.clone();
        next.filters.insert(id, updated);
        Ok(next)
    }

    /// Kinds the "add hop" menu offers: every catalog kind except the kind
    /// of the current last hop.
    pub fn addable_kinds<'a>(&self, catalog: &'a Catalog) -> Vec<&'a EntityKind> {
        let last = self.hops.last().map(|h| &h.kind);
        catalog.kinds().filter(|k| Some(*k) != last).collect()
    }
}
