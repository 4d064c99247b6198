//! Application state for the web layer.

use std::sync::Arc;

use crate::config::QueryConfig;
use crate::store::ClimateStore;

/// Shared application state.
///
/// Contains the data source and the constants used by the fixed queries.
#[derive(Clone)]
pub struct AppState {
    /// Climate data source
    pub store: Arc<dyn ClimateStore>,

    /// Cutoff date and active station
    pub query: Arc<QueryConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(store: impl ClimateStore + 'static, query: QueryConfig) -> Self {
        Self {
            store: Arc::new(store),
            query: Arc::new(query),
        }
    }
}
