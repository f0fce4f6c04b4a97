//! Step notifications reported by the detection capability.

use scrollyteller_core::direction::Direction;
use serde::{Deserialize, Serialize};

/// A raw notification about one step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScrollEvent {
    /// The step crossed the trigger line and became the current step.
    StepEnter {
        /// Step index.
        index: usize,
        /// Scroll direction.
        direction: Direction,
    },
    /// The step left the trigger line.
    StepExit {
        /// Step index.
        index: usize,
        /// Scroll direction.
        direction: Direction,
    },
    /// The current step moved relative to the trigger line.
    StepProgress {
        /// Step index.
        index: usize,
        /// Scroll direction.
        direction: Direction,
        /// How far through the step the trigger line is, in `[0, 1]`.
        progress: f64,
    },
}

impl ScrollEvent {
    /// Returns the step index the event refers to.
    #[must_use]
    pub fn index(&self) -> usize {
        match *self {
            Self::StepEnter { index, .. }
            | Self::StepExit { index, .. }
            | Self::StepProgress { index, .. } => index,
        }
    }

    /// Returns the scroll direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        match *self {
            Self::StepEnter { direction, .. }
            | Self::StepExit { direction, .. }
            | Self::StepProgress { direction, .. } => direction,
        }
    }

    /// Returns the event type name (for logging).
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::StepEnter { .. } => "scroll.step_enter",
            Self::StepExit { .. } => "scroll.step_exit",
            Self::StepProgress { .. } => "scroll.step_progress",
        }
    }
}
