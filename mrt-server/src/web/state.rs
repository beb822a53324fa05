//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedPlanner;
use crate::network::NetworkModel;

/// Shared application state.
///
/// Everything in here is read-only after startup, so handlers share it
/// without locks.
#[derive(Clone)]
pub struct AppState {
    /// The loaded network
    pub network: Arc<NetworkModel>,

    /// Route planner with its cache
    pub planner: Arc<CachedPlanner>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(network: Arc<NetworkModel>, planner: CachedPlanner) -> Self {
        Self {
            network,
            planner: Arc::new(planner),
        }
    }
}
