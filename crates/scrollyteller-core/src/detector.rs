//! Step detection capability.
//!
//! The intersection primitive that watches step elements against the
//! viewport. The orchestrator attaches each section once after its graph is
//! built; notifications then come back through
//! `Orchestrator::handle_scroll_event`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::element::StepElement;
use crate::error::StoryError;

/// Tuning passed to the detection capability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObserverOptions {
    /// Viewport trigger line, as a fraction of viewport height from the top.
    pub offset: f64,
    /// Whether continuous progress notifications are wanted.
    pub progress: bool,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            offset: 0.5,
            progress: true,
        }
    }
}

/// Everything the detector needs to observe one section.
#[derive(Debug)]
pub struct StepBinding<'a> {
    /// The story container.
    pub container_id: &'a str,
    /// The section being observed.
    pub section_id: &'a str,
    /// The section's graph element.
    pub graph_id: &'a str,
    /// The step elements to observe, in step order.
    pub steps: &'a [Arc<dyn StepElement>],
    /// Detection tuning.
    pub options: ObserverOptions,
}

/// Watches step elements and reports enter/exit/progress notifications.
pub trait StepDetector: Send + Sync {
    /// Begin observing a section's steps.
    ///
    /// # Errors
    ///
    /// Returns `StoryError` if the capability cannot observe the elements.
    fn attach(&self, binding: &StepBinding<'_>) -> Result<(), StoryError>;
}
