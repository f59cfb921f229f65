//! Application state for the web layer.

use std::sync::Arc;

use crate::store::MemoryStore;
use crate::subway::SubwayService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Subway operations over the in-memory network
    pub subway: Arc<SubwayService<MemoryStore>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(subway: SubwayService<MemoryStore>) -> Self {
        Self {
            subway: Arc::new(subway),
        }
    }
}
