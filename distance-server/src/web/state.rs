//! Application state for the web layer.

use std::sync::Arc;

use crate::catalog::DestinationCatalog;
use crate::geocode::PostcodesClient;
use crate::orchestrator::RouteOrchestrator;
use crate::routing::OsrmClient;

/// Orchestrator wired to the live upstream services.
pub type LiveOrchestrator = RouteOrchestrator<PostcodesClient, OsrmClient>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Computes result rows; owns the destination coordinate cache
    pub orchestrator: Arc<LiveOrchestrator>,

    /// Fixed destination list
    pub catalog: Arc<DestinationCatalog>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(orchestrator: LiveOrchestrator, catalog: DestinationCatalog) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            catalog: Arc::new(catalog),
        }
    }
}
