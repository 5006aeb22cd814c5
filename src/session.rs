//! Interactive session state: the chain being edited, the hop whose editor is
//! open, the shape mode, and the last compiled query with its response.
//!
//! The compiled query is cleared when a hop is added or removed or when the
//! shape mode is toggled. Toggling fields and editing filters leave it in
//! place; the user has to search again to see their effect.

use crate::catalog::{Catalog, EntityKind};
use crate::config::GluiConfig;
use crate::executor::QueryExecutor;
use crate::query_chain::{ChainError, HopId, QueryChain, SanitizationRules, SanitizedPath};
use crate::query_compiler::{compile_with_path, CompiledQuery, QueryCompilerError};
use crate::result_shaper::{shape, FetchState, RenderTree, ShapeMode};

#[derive(Debug, Clone)]
pub struct Session {
    catalog: Catalog,
    rules: SanitizationRules,
    max_chain_length: usize,
    chain: QueryChain,
    selected: Option<HopId>,
    mode: ShapeMode,
    compiled: Option<CompiledQuery>,
    fetch: FetchState,
}

impl Session {
    pub fn new(catalog: Catalog, rules: SanitizationRules, config: &GluiConfig) -> Self {
        Session {
            catalog,
            rules,
            max_chain_length: config.max_chain_length,
            chain: QueryChain::new(),
            selected: None,
            mode: config.default_mode,
            compiled: None,
            fetch: FetchState::Pending,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn chain(&self) -> &QueryChain {
        &self.chain
    }

    pub fn selected(&self) -> Option<HopId> {
        self.selected
    }

    pub fn mode(&self) -> ShapeMode {
        self.mode
    }

    pub fn compiled(&self) -> Option<&CompiledQuery> {
        self.compiled.as_ref()
    }

    pub fn fetch_state(&self) -> &FetchState {
        &self.fetch
    }

    /// Sanitized path of the current chain, computed fresh.
    pub fn path(&self) -> SanitizedPath {
        self.chain.resolve_path(&self.rules)
    }

    /// Kinds offered by the "add hop" menu.
    pub fn addable_kinds(&self) -> Vec<&EntityKind> {
        self.chain.addable_kinds(&self.catalog)
    }

    fn invalidate(&mut self) {
        if self.compiled.take().is_some() {
            log::debug!("Compiled query invalidated");
        }
        self.fetch = FetchState::Pending;
    }

    pub fn add_hop(&mut self, kind: &EntityKind) -> Result<HopId, ChainError> {
        if self.chain.len() >= self.max_chain_length {
            return Err(ChainError::ChainTooLong {
                max: self.max_chain_length,
            });
        }
        let id = HopId::new();
        self.chain = self.chain.add_hop_with_id(&self.catalog, kind, id)?;
        self.invalidate();
        Ok(id)
    }

    pub fn remove_hop(&mut self, id: HopId) -> Result<(), ChainError> {
        self.chain = self.chain.remove_hop(id)?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.invalidate();
        Ok(())
    }

    pub fn toggle_field(&mut self, id: HopId, field: &str) -> Result<(), ChainError> {
        self.chain = self.chain.toggle_field(id, field)?;
        Ok(())
    }

    pub fn set_filter(&mut self, id: HopId, filter: &str, value: &str) -> Result<(), ChainError> {
        self.chain = self.chain.set_filter(id, filter, value)?;
        Ok(())
    }

    /// Open the editor of a hop, or close it when it is already open.
    pub fn select_hop(&mut self, id: HopId) -> Result<(), ChainError> {
        if self.chain.hop(id).is_none() {
            return Err(ChainError::UnknownHop(id));
        }
        self.selected = if self.selected == Some(id) {
            None
        } else {
            Some(id)
        };
        Ok(())
    }

    pub fn toggle_mode(&mut self) -> ShapeMode {
        self.mode = self.mode.toggled();
        self.invalidate();
        self.mode
    }

    /// Compile the current chain and keep the result as the active query.
    pub fn search(&mut self) -> Result<&CompiledQuery, QueryCompilerError> {
        let (query, _) = compile_with_path(&self.chain, &self.rules)?;
        self.fetch = FetchState::Pending;
        Ok(self.compiled.insert(query))
    }

    /// Store a fetch outcome. The latest call wins.
    pub fn record_response(&mut self, fetch: FetchState) {
        self.fetch = fetch;
    }

    /// Search, then execute the query and record its outcome.
    pub fn run(&mut self, executor: &dyn QueryExecutor) -> Result<(), QueryCompilerError> {
        let query = self.search()?.clone();
        let fetch = executor.execute(&query);
        self.record_response(fetch);
        Ok(())
    }

    /// What to display: nothing until a query has been compiled and its
    /// response has arrived.
    pub fn render(&self) -> Option<RenderTree> {
        self.compiled.as_ref()?;
        shape(&self.fetch, &self.path(), self.mode, &self.catalog)
    }
}
