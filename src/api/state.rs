//! Application state for the Carrier Quote Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{LazyTableStore, TableStore};
use crate::engine::QuoteEngine;
use crate::error::EngineResult;

/// Shared application state.
///
/// Holds the reference tables, which are loaded on first use and shared by
/// every request afterwards.
#[derive(Clone)]
pub struct AppState {
    tables: Arc<LazyTableStore>,
}

impl AppState {
    /// Creates state over tables that load on first use.
    pub fn new(tables: LazyTableStore) -> Self {
        Self {
            tables: Arc::new(tables),
        }
    }

    /// Creates state over already-loaded tables.
    pub fn from_store(store: TableStore) -> Self {
        Self::new(LazyTableStore::from_store(store))
    }

    /// Returns the reference tables, loading them if needed.
    pub fn tables(&self) -> EngineResult<Arc<TableStore>> {
        self.tables.get()
    }

    /// Returns a quote engine over the shared tables.
    pub fn engine(&self) -> EngineResult<QuoteEngine> {
        Ok(QuoteEngine::new(self.tables()?))
    }
}
