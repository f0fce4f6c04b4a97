//! Headless timeline graph.
//!
//! The preview server has no drawing surface; a `TimelineGraph` keeps the
//! state a real chart would show (cursor, transition duration, size) in a
//! shared registry that the HTTP layer reads back.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use scrollyteller_core::graph::{Dimensions, GraphHandle, RenderRequest};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// What a graph currently displays.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphSnapshot {
    /// Current cursor, if the graph has rendered.
    pub cursor: Option<Value>,
    /// Transition duration of the last render.
    pub duration_ms: Option<u64>,
    /// Number of renders applied.
    pub renders: usize,
    /// Current size, if the graph has been resized.
    pub dimensions: Option<Dimensions>,
}

/// Snapshots of every graph, keyed by graph id.
#[derive(Debug, Clone, Default)]
pub struct GraphRegistry {
    graphs: Arc<Mutex<BTreeMap<String, GraphSnapshot>>>,
}

impl GraphRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a graph and returns a handle that writes to it.
    #[must_use]
    pub fn timeline(&self, graph_id: &str) -> TimelineGraph {
        self.lock().entry(graph_id.to_owned()).or_default();
        TimelineGraph {
            graph_id: graph_id.to_owned(),
            registry: self.clone(),
        }
    }

    /// Returns the snapshot of `graph_id`.
    #[must_use]
    pub fn snapshot(&self, graph_id: &str) -> Option<GraphSnapshot> {
        self.lock().get(graph_id).cloned()
    }

    fn update(&self, graph_id: &str, apply: impl FnOnce(&mut GraphSnapshot)) {
        apply(self.lock().entry(graph_id.to_owned()).or_default());
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, GraphSnapshot>> {
        self.graphs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A graph whose only output is its registry snapshot.
#[derive(Debug)]
pub struct TimelineGraph {
    graph_id: String,
    registry: GraphRegistry,
}

impl GraphHandle for TimelineGraph {
    fn render(&mut self, request: &RenderRequest) {
        debug!(graph_id = %self.graph_id, cursor = %request.cursor, duration_ms = request.duration_ms, "render");
        self.registry.update(&self.graph_id, |snapshot| {
            snapshot.cursor = Some(request.cursor.clone());
            snapshot.duration_ms = Some(request.duration_ms);
            snapshot.renders += 1;
        });
    }

    fn resize(&mut self, dimensions: Dimensions) {
        self.registry.update(&self.graph_id, |snapshot| {
            snapshot.dimensions = Some(dimensions);
        });
    }
}
