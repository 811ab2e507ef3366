//! Application state for the web layer.

use std::sync::Arc;

use crate::planner::RouteEngine;

/// Shared application state.
///
/// The engine is immutable, so every request reads it without locking.
#[derive(Clone)]
pub struct AppState {
    /// Trip planner over the configured network
    pub engine: Arc<RouteEngine>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(engine: RouteEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}
