//! glui - GraphQL query builder for chained entity hops
//!
//! This crate turns a chain of entity hops (school → group → teacher →
//! student) into a single nested GraphQL query and shapes the response:
//! - Entity catalog of selectable and filterable fields
//! - Context-dependent type sanitization
//! - Selection tree compilation
//! - Flat (deduplicated) or nested result rendering

pub mod utils;

pub mod catalog;
pub mod config;
pub mod executor;
pub mod query_chain;
pub mod query_compiler;
pub mod result_shaper;
pub mod session;
