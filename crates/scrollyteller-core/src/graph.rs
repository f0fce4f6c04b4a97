//! Graph lifecycle contract.
//!
//! The orchestrator never looks inside a graph. Anything that can render a
//! domain cursor (and optionally resize) can be plugged into a section.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Render duration used for continuous scroll progress.
pub const SCROLL_RENDER_DURATION_MS: u64 = 100;

/// Render duration used when a narration block becomes active.
pub const ACTIVATE_RENDER_DURATION_MS: u64 = 1000;

/// Share of the container's offset dimensions handed to `resize`.
pub const RESIZE_FRACTION: f64 = 0.9;

/// A request to move a graph to a domain cursor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderRequest {
    /// Domain position to show (a year, a category, a step key).
    pub cursor: Value,
    /// Transition length in milliseconds.
    pub duration_ms: u64,
}

impl RenderRequest {
    /// Creates a request with an explicit duration.
    #[must_use]
    pub fn new(cursor: impl Into<Value>, duration_ms: u64) -> Self {
        Self {
            cursor: cursor.into(),
            duration_ms,
        }
    }

    /// A light transition for continuous scroll progress.
    #[must_use]
    pub fn on_scroll(cursor: impl Into<Value>) -> Self {
        Self::new(cursor, SCROLL_RENDER_DURATION_MS)
    }

    /// A full transition for narration activation.
    #[must_use]
    pub fn on_activate(cursor: impl Into<Value>) -> Self {
        Self::new(cursor, ACTIVATE_RENDER_DURATION_MS)
    }
}

/// Width and height in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Dimensions {
    /// Creates a new pair of dimensions.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Scales both axes by `fraction`.
    #[must_use]
    pub fn scaled(self, fraction: f64) -> Self {
        Self {
            width: self.width * fraction,
            height: self.height * fraction,
        }
    }
}

/// The two-method lifecycle every visualization implements.
pub trait GraphHandle: Send + Sync {
    /// Moves the visualization to `request.cursor`.
    ///
    /// Calling this twice in a row with the same cursor must not re-animate.
    fn render(&mut self, request: &RenderRequest);

    /// Fits the visualization into new dimensions. Graphs that do not resize
    /// keep the default no-op.
    fn resize(&mut self, dimensions: Dimensions) {
        let _ = dimensions;
    }
}

impl<G: GraphHandle + ?Sized> GraphHandle for Box<G> {
    fn render(&mut self, request: &RenderRequest) {
        (**self).render(request);
    }

    fn resize(&mut self, dimensions: Dimensions) {
        (**self).resize(dimensions);
    }
}

/// Wraps a graph and drops renders whose cursor matches the last one.
#[derive(Debug)]
pub struct DedupedGraph<G> {
    inner: G,
    last_cursor: Option<Value>,
}

impl<G: GraphHandle> DedupedGraph<G> {
    /// Wraps `inner`.
    #[must_use]
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            last_cursor: None,
        }
    }

    /// Returns the wrapped graph.
    pub fn inner(&self) -> &G {
        &self.inner
    }
}

impl<G: GraphHandle> GraphHandle for DedupedGraph<G> {
    fn render(&mut self, request: &RenderRequest) {
        if self.last_cursor.as_ref() == Some(&request.cursor) {
            return;
        }
        self.last_cursor = Some(request.cursor.clone());
        self.inner.render(request);
    }

    fn resize(&mut self, dimensions: Dimensions) {
        self.inner.resize(dimensions);
    }
}
