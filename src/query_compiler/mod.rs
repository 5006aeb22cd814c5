//! Query compiler: turns a query chain into one nested GraphQL query string.
//!
//! # Pipeline
//!
//! 1. Resolve the sanitized path of the chain (one GraphQL type per hop).
//! 2. Build a [`SelectionNode`] tree, outermost hop first, each node holding
//!    its included fields and non-empty filters in catalog order.
//! 3. Serialize the tree in one pass inside the anonymous operation braces.
//!
//! # Example
//!
//! ```text
//! Chain:  [schools(name = "X") {id name}] -> [students {userName}]
//! Output: {schools(name: "X") {id name students {userName}}}
//! ```

mod errors;
pub mod selection_tree;
pub mod to_graphql;

use std::fmt;

use serde::Serialize;

use crate::query_chain::{QueryChain, SanitizationRules, SanitizedPath};

pub use errors::QueryCompilerError;
pub use selection_tree::{build_selection_tree, SelectionNode};
pub use to_graphql::{QueryDocument, ToGraphql};

/// A compiled GraphQL query string. Never parsed back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CompiledQuery(String);

impl CompiledQuery {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CompiledQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compile a chain, returning the query together with the path it was
/// compiled against (the result shaper walks the same path).
pub fn compile_with_path(
    chain: &QueryChain,
    rules: &SanitizationRules,
) -> Result<(CompiledQuery, SanitizedPath), QueryCompilerError> {
    if chain.is_empty() {
        return Err(QueryCompilerError::EmptyChain);
    }

    let path = chain.resolve_path(rules);
    let tree = build_selection_tree(chain, &path)?;
    let query = CompiledQuery(QueryDocument(&tree).to_graphql());

    log::debug!("Compiled {} nested selection(s): {}", tree.depth(), query);
    Ok((query, path))
}

pub fn compile(
    chain: &QueryChain,
    rules: &SanitizationRules,
) -> Result<CompiledQuery, QueryCompilerError> {
    compile_with_path(chain, rules).map(|(query, _)| query)
}
