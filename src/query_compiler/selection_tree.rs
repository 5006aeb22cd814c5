use super::errors::QueryCompilerError;
use crate::query_chain::{QueryChain, SanitizedPath};

/// One selection level: `type(args) { fields child }`.
///
/// Each node has a single child slot, filled by the next hop of the chain.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionNode {
    pub type_name: String,
    /// `(filter, value)` pairs with non-empty values, in catalog order
    pub arguments: Vec<(String, String)>,
    /// Included field names, in catalog order
    pub fields: Vec<String>,
    pub child: Option<Box<SelectionNode>>,
}

impl SelectionNode {
    pub fn depth(&self) -> usize {
        1 + self.child.as_ref().map_or(0, |c| c.depth())
    }
}

/// Build the nested selection tree of a chain.
///
/// Nodes are attached outermost to innermost: each new node goes into the
/// child slot of the node before it, and the innermost slot stays empty.
pub fn build_selection_tree(
    chain: &QueryChain,
    path: &SanitizedPath,
) -> Result<SelectionNode, QueryCompilerError> {
    let mut root: Option<Box<SelectionNode>> = None;
    let mut slot = &mut root;

    for (hop, segment) in chain.hops().iter().zip(path.segments()) {
        let fields = chain
            .fields(hop.id)
            .ok_or(QueryCompilerError::MissingHopState(hop.id))?;
        let filters = chain
            .filters(hop.id)
            .ok_or(QueryCompilerError::MissingHopState(hop.id))?;

        let node = SelectionNode {
            type_name: segment.resolved_type.clone(),
            arguments: filters
                .active()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            fields: fields.included().map(str::to_string).collect(),
            child: None,
        };
        slot = &mut slot.insert(Box::new(node)).child;
    }

    root.map(|node| *node).ok_or(QueryCompilerError::EmptyChain)
}
