use thiserror::Error;

use super::hop::HopId;
use crate::catalog::CatalogError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ChainError {
    #[error("No hop with id {0} in the chain")]
    UnknownHop(HopId),
    #[error("Hop id {0} is already in use")]
    DuplicateHop(HopId),
    #[error("Hop {hop} has no field `{field}`")]
    UnknownField { hop: HopId, field: String },
    #[error("Hop {hop} has no filter `{filter}`")]
    UnknownFilter { hop: HopId, filter: String },
    #[error("Chain already holds the maximum of {max} hops")]
    ChainTooLong { max: usize },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
