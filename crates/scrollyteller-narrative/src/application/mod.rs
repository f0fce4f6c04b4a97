//! Narration assembly.

pub mod entries;
