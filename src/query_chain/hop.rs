use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::EntityKind;

/// Opaque identifier of a hop. Generated once when the hop is appended and
/// never reused; it is the join key between a hop and its field/filter state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HopId(Uuid);

impl HopId {
    pub fn new() -> Self {
        HopId(Uuid::new_v4())
    }
}

impl Default for HopId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One stage of the chain: one nested selection level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hop {
    pub id: HopId,
    pub kind: EntityKind,
}

/// Ordered `(field, included)` pairs of one hop, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldSelection(Vec<(String, bool)>);

impl FieldSelection {
    /// Every catalog field, all included.
    pub fn all_included(fields: &[String]) -> Self {
        FieldSelection(fields.iter().map(|f| (f.clone(), true)).collect())
    }

    /// Copy with `name` flipped. `None` when the hop has no such field.
    pub fn toggled(&self, name: &str) -> Option<Self> {
        if !self.0.iter().any(|(f, _)| f == name) {
            return None;
        }
        Some(FieldSelection(
            self.0
                .iter()
                .map(|(f, included)| (f.clone(), if f == name { !included } else { *included }))
                .collect(),
        ))
    }

    pub fn is_included(&self, name: &str) -> Option<bool> {
        self.0.iter().find(|(f, _)| f == name).map(|(_, v)| *v)
    }

    /// Names of the included fields, in catalog order.
    pub fn included(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, included)| *included)
            .map(|(f, _)| f.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(f, v)| (f.as_str(), *v))
    }
}

/// Ordered `(filter, value)` pairs of one hop, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterValues(Vec<(String, String)>);

impl FilterValues {
    /// Every catalog filter with an empty value.
    pub fn blank(filters: &[String]) -> Self {
        FilterValues(filters.iter().map(|f| (f.clone(), String::new())).collect())
    }

    /// Copy with `name` set to `value`. `None` when the hop has no such filter.
    pub fn with_value(&self, name: &str, value: &str) -> Option<Self> {
        if !self.0.iter().any(|(f, _)| f == name) {
            return None;
        }
        Some(FilterValues(
            self.0
                .iter()
                .map(|(f, v)| {
                    if f == name {
                        (f.clone(), value.to_string())
                    } else {
                        (f.clone(), v.clone())
                    }
                })
                .collect(),
        ))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.iter().find(|(f, _)| f == name).map(|(_, v)| v.as_str())
    }

    /// Filters with a non-empty value, in catalog order.
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(f, v)| (f.as_str(), v.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(f, v)| (f.as_str(), v.as_str()))
    }
}
