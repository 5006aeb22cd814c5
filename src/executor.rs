//! Query execution seam.
//!
//! Transport is someone else's job: an executor takes a compiled query and
//! reports back the fetch tri-state. GraphQL `errors` are suppressed; a
//! response only counts as failed when it carries no `data`.

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;
use serde_json::Value;

use crate::query_compiler::CompiledQuery;
use crate::result_shaper::FetchState;

pub trait QueryExecutor {
    fn execute(&self, query: &CompiledQuery) -> FetchState;
}

impl<F> QueryExecutor for F
where
    F: Fn(&CompiledQuery) -> FetchState,
{
    fn execute(&self, query: &CompiledQuery) -> FetchState {
        self(query)
    }
}

/// Standard GraphQL response envelope
#[derive(Debug, Deserialize)]
struct ResponseEnvelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<Value>,
}

/// Read a GraphQL response body into a fetch state.
pub fn parse_response(body: &str) -> FetchState {
    let envelope: ResponseEnvelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(e) => {
            log::debug!("Discarding unparseable response: {}", e);
            return FetchState::Failed;
        }
    };

    if !envelope.errors.is_empty() {
        log::debug!("Ignoring {} GraphQL error(s)", envelope.errors.len());
    }

    match envelope.data {
        Some(Value::Null) | None => FetchState::Failed,
        Some(data) => FetchState::Ready(data),
    }
}

/// Serves a canned response from a JSON file, whatever the query.
#[derive(Debug, Clone)]
pub struct FixtureExecutor {
    path: PathBuf,
}

impl FixtureExecutor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FixtureExecutor { path: path.into() }
    }
}

impl QueryExecutor for FixtureExecutor {
    fn execute(&self, query: &CompiledQuery) -> FetchState {
        log::info!("Executing against {}: {}", self.path.display(), query);
        match fs::read_to_string(&self.path) {
            Ok(body) => parse_response(&body),
            Err(e) => {
                log::debug!("Failed to read {}: {}", self.path.display(), e);
                FetchState::Failed
            }
        }
    }
}
