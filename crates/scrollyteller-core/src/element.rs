//! Step element abstraction.
//!
//! A step element is the DOM node behind one narration block. The DOM owns
//! it; the orchestrator only toggles its active flag.

/// A narration block's element, as seen by the orchestrator.
pub trait StepElement: Send + Sync + std::fmt::Debug {
    /// Adds or removes the element's active marker.
    fn set_active(&self, active: bool);

    /// Returns whether the element currently carries the active marker.
    fn is_active(&self) -> bool;
}
