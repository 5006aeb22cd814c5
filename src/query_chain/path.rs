use serde::Serialize;

use super::hop::{Hop, HopId};
use super::sanitizer::SanitizationRules;

/// One resolved hop: the GraphQL type name emitted for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathSegment {
    pub hop_id: HopId,
    pub resolved_type: String,
}

/// The sanitized type sequence of a chain, one segment per hop.
///
/// Always derived from the chain it describes; recompute it after every
/// chain mutation rather than keeping it around.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SanitizedPath(Vec<PathSegment>);

impl SanitizedPath {
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn first(&self) -> Option<&PathSegment> {
        self.0.first()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|s| s.resolved_type.as_str())
    }

    pub fn resolved_type(&self, hop_id: HopId) -> Option<&str> {
        self.0
            .iter()
            .find(|s| s.hop_id == hop_id)
            .map(|s| s.resolved_type.as_str())
    }
}

/// Walk the hops left to right. The first hop keeps its raw kind; each later
/// hop is sanitized against the resolved type of the hop before it.
pub fn resolve_path(hops: &[Hop], rules: &SanitizationRules) -> SanitizedPath {
    let mut segments: Vec<PathSegment> = Vec::with_capacity(hops.len());
    for hop in hops {
        let resolved_type = match segments.last() {
            Some(previous) => rules
                .sanitize(&previous.resolved_type, hop.kind.as_str())
                .to_string(),
            None => hop.kind.to_string(),
        };
        segments.push(PathSegment {
            hop_id: hop.id,
            resolved_type,
        });
    }
    SanitizedPath(segments)
}
