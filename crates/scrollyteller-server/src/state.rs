//! Shared application state.

use std::sync::Arc;

use scrollyteller_orchestrator::Orchestrator;
use tokio::sync::Mutex;

use crate::graph::GraphRegistry;
use crate::scaffold::RemoteDetector;

/// Application state shared across all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The story being previewed.
    pub orchestrator: Arc<Mutex<Orchestrator>>,
    /// Graph snapshots written by the story's graphs.
    pub graphs: GraphRegistry,
    /// Observer options recorded when sections were attached.
    pub detector: Arc<RemoteDetector>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(orchestrator: Orchestrator, graphs: GraphRegistry, detector: Arc<RemoteDetector>) -> Self {
        Self {
            orchestrator: Arc::new(Mutex::new(orchestrator)),
            graphs,
            detector,
        }
    }
}
