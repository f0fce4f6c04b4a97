//! Headless step elements and detection.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use scrollyteller_core::detector::{ObserverOptions, StepBinding, StepDetector};
use scrollyteller_core::element::StepElement;
use scrollyteller_core::error::StoryError;
use scrollyteller_core::scaffold::{
    ScaffoldRequest, SectionScaffold, SectionScaffolder, default_graph_id,
};
use tracing::info;

/// A step with no markup behind it, only an active flag.
#[derive(Debug, Default)]
pub struct HeadlessStep {
    active: AtomicBool,
}

impl StepElement for HeadlessStep {
    fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::Relaxed);
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }
}

/// Creates one `HeadlessStep` per narration row.
#[derive(Debug, Default)]
pub struct HeadlessScaffolder;

impl SectionScaffolder for HeadlessScaffolder {
    fn scaffold(&self, request: &ScaffoldRequest<'_>) -> SectionScaffold {
        SectionScaffold {
            graph_id: default_graph_id(request.container_id, request.section_id),
            steps: request
                .narration
                .iter()
                .map(|_| Arc::new(HeadlessStep::default()) as Arc<dyn StepElement>)
                .collect(),
        }
    }
}

/// Detection for a client that reports step events over HTTP.
///
/// Nothing is observed server-side; the detector remembers each section's
/// options so clients can read them back and drive events accordingly.
#[derive(Debug, Default)]
pub struct RemoteDetector {
    options: Mutex<BTreeMap<String, ObserverOptions>>,
}

impl RemoteDetector {
    /// Create a detector with no sections attached.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the options `section_id` was attached with.
    #[must_use]
    pub fn options(&self, section_id: &str) -> Option<ObserverOptions> {
        self.options
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(section_id)
            .copied()
    }
}

impl StepDetector for RemoteDetector {
    fn attach(&self, binding: &StepBinding<'_>) -> Result<(), StoryError> {
        info!(
            section_id = binding.section_id,
            graph_id = binding.graph_id,
            steps = binding.steps.len(),
            offset = binding.options.offset,
            progress = binding.options.progress,
            "section attached"
        );
        self.options
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(binding.section_id.to_owned(), binding.options);
        Ok(())
    }
}
