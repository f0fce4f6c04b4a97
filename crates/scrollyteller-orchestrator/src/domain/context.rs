//! Callback arguments.

use std::sync::Arc;

use scrollyteller_core::direction::Direction;
use scrollyteller_core::element::StepElement;
use scrollyteller_core::graph::{Dimensions, GraphHandle};
use scrollyteller_narrative::{NarrationEntry, TriggerState};

use super::section::SectionView;

/// Argument to activation and scroll callbacks.
pub struct StepContext<'a> {
    /// Step index.
    pub index: usize,
    /// Progress through the step; `0.0` on activation.
    pub progress: f64,
    /// The step element, if it still exists.
    pub element: Option<Arc<dyn StepElement>>,
    /// The narration block's raw trigger.
    pub trigger: &'a str,
    /// Decomposed trigger state, when decomposition is enabled.
    pub state: Option<&'a TriggerState>,
    /// Scroll direction.
    pub direction: Direction,
    /// Graph element id.
    pub graph_id: &'a str,
    /// The section the step belongs to.
    pub section: SectionView<'a>,
    /// The section's graph.
    pub graph: &'a mut dyn GraphHandle,
}

impl StepContext<'_> {
    /// Returns the narration entry for this step.
    #[must_use]
    pub fn entry(&self) -> &NarrationEntry {
        &self.section.narration[self.index]
    }

    /// Looks up a decomposed state value.
    #[must_use]
    pub fn state_value(&self, key: &str) -> Option<&str> {
        self.state?.get(key).map(String::as_str)
    }
}

/// Argument to resize callbacks.
pub struct ResizeContext<'a> {
    /// The container's offset dimensions.
    pub container: Dimensions,
    /// The dimensions the graph should take (a fixed fraction of the
    /// container).
    pub graph_dimensions: Dimensions,
    /// Graph element id.
    pub graph_id: &'a str,
    /// The section being resized.
    pub section: SectionView<'a>,
    /// The section's graph.
    pub graph: &'a mut dyn GraphHandle,
}
