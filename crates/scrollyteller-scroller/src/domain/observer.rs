//! Per-section scroll observer.

use std::sync::{Arc, Weak};

use scrollyteller_core::direction::Direction;
use scrollyteller_core::element::StepElement;
use scrollyteller_core::error::StoryError;
use tracing::{debug, warn};

use super::events::ScrollEvent;

/// Classification of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPhase {
    /// Not under the trigger line.
    Idle,
    /// The current step; progress notifications are accepted.
    Active,
}

/// What the orchestrator should tell user code after an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepDispatch {
    /// A narration block became active.
    Activate {
        /// Step index.
        index: usize,
        /// Scroll direction.
        direction: Direction,
    },
    /// The active narration block scrolled.
    Scroll {
        /// Step index.
        index: usize,
        /// Scroll direction.
        direction: Direction,
        /// Progress as reported by the detector.
        progress: f64,
    },
}

/// Owns a section's step states, active index and last progress.
///
/// At most one step is `Active` at a time, and only the active step's element
/// carries the active marker.
#[derive(Debug)]
pub struct ScrollObserver {
    section_id: String,
    steps: Vec<Weak<dyn StepElement>>,
    phases: Vec<StepPhase>,
    active_index: Option<usize>,
    last_progress: f64,
}

impl ScrollObserver {
    /// Creates an observer over `steps`, all of them idle.
    #[must_use]
    pub fn new(section_id: impl Into<String>, steps: &[Arc<dyn StepElement>]) -> Self {
        Self {
            section_id: section_id.into(),
            steps: steps.iter().map(Arc::downgrade).collect(),
            phases: vec![StepPhase::Idle; steps.len()],
            active_index: None,
            last_progress: 0.0,
        }
    }

    /// Returns the index of the active step.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    /// Returns the progress of the most recent accepted progress event, or
    /// `0.0` right after activation.
    #[must_use]
    pub fn last_progress(&self) -> f64 {
        self.last_progress
    }

    /// Returns whether step `index` is active.
    #[must_use]
    pub fn is_active(&self, index: usize) -> bool {
        self.phases.get(index) == Some(&StepPhase::Active)
    }

    /// Returns the phase of every step, in order.
    #[must_use]
    pub fn phases(&self) -> &[StepPhase] {
        &self.phases
    }

    /// Applies one notification and returns the dispatch it warrants.
    ///
    /// Exits never dispatch. Progress for a step that is not active is
    /// ignored, so activation always precedes the first progress dispatch.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::UnknownStep` if the event's index is out of range.
    pub fn observe(&mut self, event: &ScrollEvent) -> Result<Option<StepDispatch>, StoryError> {
        let index = event.index();
        if index >= self.phases.len() {
            return Err(StoryError::UnknownStep {
                section_id: self.section_id.clone(),
                index,
            });
        }

        let dispatch = match *event {
            ScrollEvent::StepEnter { direction, .. } => {
                self.enter(index);
                Some(StepDispatch::Activate { index, direction })
            }
            ScrollEvent::StepExit { .. } => {
                self.exit(index);
                None
            }
            ScrollEvent::StepProgress {
                direction, progress, ..
            } => {
                if self.phases[index] == StepPhase::Active {
                    self.last_progress = progress;
                    Some(StepDispatch::Scroll {
                        index,
                        direction,
                        progress,
                    })
                } else {
                    warn!(
                        section_id = %self.section_id,
                        index,
                        "progress for an idle step ignored"
                    );
                    None
                }
            }
        };

        debug!(
            section_id = %self.section_id,
            event_type = event.event_type(),
            index,
            direction = %event.direction(),
            active_index = ?self.active_index,
            "step event observed"
        );

        Ok(dispatch)
    }

    fn enter(&mut self, index: usize) {
        if let Some(previous) = self.active_index.filter(|&previous| previous != index) {
            self.phases[previous] = StepPhase::Idle;
            self.mark(previous, false);
        }
        self.phases[index] = StepPhase::Active;
        self.active_index = Some(index);
        self.last_progress = 0.0;
        self.mark(index, true);
    }

    fn exit(&mut self, index: usize) {
        self.phases[index] = StepPhase::Idle;
        if self.active_index == Some(index) {
            self.active_index = None;
        }
        self.mark(index, false);
    }

    fn mark(&self, index: usize, active: bool) {
        match self.steps[index].upgrade() {
            Some(element) => element.set_active(active),
            None => warn!(
                section_id = %self.section_id,
                index,
                "step element no longer exists"
            ),
        }
    }
}
