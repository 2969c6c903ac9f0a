//! Application state shared across handlers.

use std::sync::Arc;

use wd_core::{CorrelationConfig, Store};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Alert and incident store; the single owner of mutable state.
    pub store: Arc<Store>,
}

impl AppState {
    /// Creates application state around a fresh store.
    pub fn new(config: CorrelationConfig) -> Self {
        Self {
            store: Arc::new(Store::new(config)),
        }
    }

    /// Creates application state around an existing store.
    pub fn with_store(store: Arc<Store>) -> Self {
        Self { store }
    }
}
