use thiserror::Error;

use crate::query_chain::HopId;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum QueryCompilerError {
    #[error("Cannot compile an empty chain (add at least one hop)")]
    EmptyChain,
    #[error("Hop {0} has no field/filter state (chain state is inconsistent)")]
    MissingHopState(HopId),
}
