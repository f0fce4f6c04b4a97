//! Narration domain types.

pub mod entry;
pub mod trigger;
