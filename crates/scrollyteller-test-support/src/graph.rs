//! Test graphs — `GraphHandle` implementations that record lifecycle calls.

use std::sync::{Arc, Mutex};

use scrollyteller_core::graph::{Dimensions, GraphHandle, RenderRequest};

/// One lifecycle call received by a `RecordingGraph`.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphCall {
    /// `render` was called.
    Render(RenderRequest),
    /// `resize` was called.
    Resize(Dimensions),
}

/// Shared log of graph calls. Clones observe the same log, so a test can keep
/// one while the orchestrator owns the graph.
#[derive(Debug, Clone, Default)]
pub struct GraphLog {
    calls: Arc<Mutex<Vec<GraphCall>>>,
}

impl GraphLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph that appends to this log.
    #[must_use]
    pub fn graph(&self) -> RecordingGraph {
        RecordingGraph { log: self.clone() }
    }

    /// Returns a snapshot of all recorded calls.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<GraphCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Returns only the recorded render requests.
    #[must_use]
    pub fn renders(&self) -> Vec<RenderRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GraphCall::Render(request) => Some(request),
                GraphCall::Resize(_) => None,
            })
            .collect()
    }

    /// Returns only the recorded resize dimensions.
    #[must_use]
    pub fn resizes(&self) -> Vec<Dimensions> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GraphCall::Resize(dimensions) => Some(dimensions),
                GraphCall::Render(_) => None,
            })
            .collect()
    }

    fn push(&self, call: GraphCall) {
        self.calls.lock().unwrap().push(call);
    }
}

/// A graph that records every `render` and `resize` call into a `GraphLog`.
#[derive(Debug)]
pub struct RecordingGraph {
    log: GraphLog,
}

impl GraphHandle for RecordingGraph {
    fn render(&mut self, request: &RenderRequest) {
        self.log.push(GraphCall::Render(request.clone()));
    }

    fn resize(&mut self, dimensions: Dimensions) {
        self.log.push(GraphCall::Resize(dimensions));
    }
}
