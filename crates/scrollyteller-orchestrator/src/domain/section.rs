//! Rendered sections.

use scrollyteller_core::graph::GraphHandle;
use scrollyteller_core::scaffold::SectionScaffold;
use scrollyteller_narrative::NarrationEntry;
use scrollyteller_scroller::ScrollObserver;
use serde_json::Value;

use super::config::{ResizeCallback, StepCallback};

/// User callbacks retained after rendering.
#[derive(Default)]
pub(crate) struct SectionCallbacks {
    pub on_scroll: Option<StepCallback>,
    pub on_activate_narration: Option<StepCallback>,
    pub on_resize: Option<ResizeCallback>,
}

/// A section after `render()`: resolved narration and data, its graph and
/// its scroll observer.
///
/// Only the orchestrator writes these fields. Callbacks see them through a
/// `SectionView` and reach the graph through the context they are given.
pub struct Section {
    pub(crate) id: String,
    pub(crate) position: usize,
    pub(crate) narration: Vec<NarrationEntry>,
    pub(crate) data: Vec<Value>,
    pub(crate) derived: Option<Value>,
    pub(crate) graph_id: String,
    pub(crate) graph: Box<dyn GraphHandle>,
    pub(crate) scroller: ScrollObserver,
    pub(crate) scaffold: SectionScaffold,
    pub(crate) callbacks: SectionCallbacks,
}

impl Section {
    /// Returns the section identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the section's position in the story.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the resolved narration entries.
    #[must_use]
    pub fn narration(&self) -> &[NarrationEntry] {
        &self.narration
    }

    /// Returns the resolved data rows.
    #[must_use]
    pub fn data(&self) -> &[Value] {
        &self.data
    }

    /// Returns the output of the reshape function, if one was configured.
    #[must_use]
    pub fn derived(&self) -> Option<&Value> {
        self.derived.as_ref()
    }

    /// Returns the graph element id.
    #[must_use]
    pub fn graph_id(&self) -> &str {
        &self.graph_id
    }

    /// Returns the scroll observer.
    #[must_use]
    pub fn scroller(&self) -> &ScrollObserver {
        &self.scroller
    }

    /// Returns the number of step elements the scaffold produced.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.scaffold.steps.len()
    }

    /// Returns a read-only view of the section.
    #[must_use]
    pub fn view(&self) -> SectionView<'_> {
        SectionView {
            id: &self.id,
            position: self.position,
            graph_id: &self.graph_id,
            narration: &self.narration,
            data: &self.data,
            derived: self.derived.as_ref(),
        }
    }
}

impl std::fmt::Debug for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Section")
            .field("id", &self.id)
            .field("position", &self.position)
            .field("narration", &self.narration.len())
            .field("data", &self.data.len())
            .field("graph_id", &self.graph_id)
            .field("scroller", &self.scroller)
            .finish_non_exhaustive()
    }
}

/// Read-only view of a section handed to user code.
#[derive(Debug, Clone, Copy)]
pub struct SectionView<'a> {
    /// Section identifier.
    pub id: &'a str,
    /// Position in the story.
    pub position: usize,
    /// Graph element id.
    pub graph_id: &'a str,
    /// Resolved narration entries.
    pub narration: &'a [NarrationEntry],
    /// Resolved data rows.
    pub data: &'a [Value],
    /// Reshaped data, if a reshape function was configured.
    pub derived: Option<&'a Value>,
}
