//! Application state for the web layer.

use std::sync::Arc;

use crate::engine::RouteEngine;
use crate::source::ConfiguredSource;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Route engine holding the published graph
    pub engine: Arc<RouteEngine>,

    /// Source used by `POST /admin/reload`
    pub source: Arc<ConfiguredSource>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(engine: Arc<RouteEngine>, source: ConfiguredSource) -> Self {
        Self {
            engine,
            source: Arc::new(source),
        }
    }
}
