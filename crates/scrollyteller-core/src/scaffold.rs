//! Section scaffolding abstraction.
//!
//! Building the spacer, narration and graph elements for a section is the job
//! of an external collaborator. The orchestrator hands it the resolved
//! narration and receives the graph id plus one step element per row.

use std::sync::Arc;

use serde_json::Value;

use crate::element::StepElement;

/// Input to a scaffolding pass for one section.
#[derive(Debug)]
pub struct ScaffoldRequest<'a> {
    /// The story container the section lives in.
    pub container_id: &'a str,
    /// The section identifier.
    pub section_id: &'a str,
    /// Position of the section within the story.
    pub section_index: usize,
    /// Resolved narration rows, in step order.
    pub narration: Vec<&'a Value>,
}

/// What a scaffolding pass produced.
#[derive(Debug)]
pub struct SectionScaffold {
    /// Identifier of the element the graph is mounted into.
    pub graph_id: String,
    /// One element per narration row, in step order.
    pub steps: Vec<Arc<dyn StepElement>>,
}

/// Builds the element structure for a section.
pub trait SectionScaffolder: Send + Sync {
    /// Scaffold one section.
    fn scaffold(&self, request: &ScaffoldRequest<'_>) -> SectionScaffold;
}

/// Conventional graph element id for a section.
#[must_use]
pub fn default_graph_id(container_id: &str, section_id: &str) -> String {
    format!("{container_id}__{section_id}__graph")
}
