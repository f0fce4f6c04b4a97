//! Scrollyteller — narration context.
//!
//! Responsible for turning resolved narration rows into step-ordered
//! narration entries, optionally decomposing each trigger string into a
//! key/value state mapping.

pub mod application;
pub mod domain;

pub use application::entries::build_entries;
pub use domain::entry::NarrationEntry;
pub use domain::trigger::{TriggerDecomposition, TriggerState, decompose_trigger};
