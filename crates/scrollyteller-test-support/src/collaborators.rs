//! Test collaborators — scaffolding and step detection doubles.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use scrollyteller_core::detector::{ObserverOptions, StepBinding, StepDetector};
use scrollyteller_core::element::StepElement;
use scrollyteller_core::error::StoryError;
use scrollyteller_core::scaffold::{
    ScaffoldRequest, SectionScaffold, SectionScaffolder, default_graph_id,
};

/// An in-memory step element that tracks its active flag.
#[derive(Debug, Default)]
pub struct MockStep {
    active: AtomicBool,
    activations: AtomicUsize,
}

impl MockStep {
    /// Create an inactive step.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many times the step has been switched on.
    #[must_use]
    pub fn activations(&self) -> usize {
        self.activations.load(Ordering::SeqCst)
    }
}

impl StepElement for MockStep {
    fn set_active(&self, active: bool) {
        if active {
            self.activations.fetch_add(1, Ordering::SeqCst);
        }
        self.active.store(active, Ordering::SeqCst);
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

/// A scaffolder that creates one `MockStep` per narration row and keeps them
/// alive, like the DOM would.
#[derive(Debug, Default)]
pub struct RecordingScaffolder {
    sections: Mutex<Vec<(String, Vec<Arc<MockStep>>)>>,
}

impl RecordingScaffolder {
    /// Create a scaffolder with no sections.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the section ids scaffolded so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn scaffolded_sections(&self) -> Vec<String> {
        self.sections
            .lock()
            .unwrap()
            .iter()
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Returns the step elements created for `section_id`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn steps(&self, section_id: &str) -> Vec<Arc<MockStep>> {
        self.sections
            .lock()
            .unwrap()
            .iter()
            .find(|(id, _)| id == section_id)
            .map(|(_, steps)| steps.clone())
            .unwrap_or_default()
    }

    /// Returns the indices of active steps in `section_id`.
    #[must_use]
    pub fn active_steps(&self, section_id: &str) -> Vec<usize> {
        self.steps(section_id)
            .iter()
            .enumerate()
            .filter(|(_, step)| step.is_active())
            .map(|(index, _)| index)
            .collect()
    }
}

impl SectionScaffolder for RecordingScaffolder {
    fn scaffold(&self, request: &ScaffoldRequest<'_>) -> SectionScaffold {
        let mocks: Vec<Arc<MockStep>> = request
            .narration
            .iter()
            .map(|_| Arc::new(MockStep::new()))
            .collect();
        let steps = mocks
            .iter()
            .map(|step| Arc::clone(step) as Arc<dyn StepElement>)
            .collect();

        self.sections
            .lock()
            .unwrap()
            .push((request.section_id.to_owned(), mocks));

        SectionScaffold {
            graph_id: default_graph_id(request.container_id, request.section_id),
            steps,
        }
    }
}

/// A snapshot of one `StepDetector::attach` call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedBinding {
    /// The observed section.
    pub section_id: String,
    /// The section's graph element.
    pub graph_id: String,
    /// Number of steps handed to the detector.
    pub step_count: usize,
    /// Detection tuning.
    pub options: ObserverOptions,
}

/// A detector that records every attach call and always succeeds.
#[derive(Debug, Default)]
pub struct RecordingDetector {
    bindings: Mutex<Vec<RecordedBinding>>,
}

impl RecordingDetector {
    /// Create a detector with no bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all recorded bindings.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn bindings(&self) -> Vec<RecordedBinding> {
        self.bindings.lock().unwrap().clone()
    }
}

impl StepDetector for RecordingDetector {
    fn attach(&self, binding: &StepBinding<'_>) -> Result<(), StoryError> {
        self.bindings.lock().unwrap().push(RecordedBinding {
            section_id: binding.section_id.to_owned(),
            graph_id: binding.graph_id.to_owned(),
            step_count: binding.steps.len(),
            options: binding.options,
        });
        Ok(())
    }
}
