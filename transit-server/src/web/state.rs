//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::PlanCache;
use crate::network::MemoryNetwork;
use crate::planner::PlannerConfig;

/// Shared application state.
///
/// Contains all the services needed to handle requests. Everything here
/// is read-only after startup, so handlers clone freely.
#[derive(Clone)]
pub struct AppState {
    /// The network store queried by the planner
    pub network: Arc<MemoryNetwork>,

    /// Journey planner configuration
    pub config: Arc<PlannerConfig>,

    /// Response cache for planning results
    pub cache: Arc<PlanCache>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(network: MemoryNetwork, config: PlannerConfig, cache: PlanCache) -> Self {
        Self {
            network: Arc::new(network),
            config: Arc::new(config),
            cache: Arc::new(cache),
        }
    }
}
