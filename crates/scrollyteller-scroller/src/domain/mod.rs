//! Scroll observation domain types.

pub mod events;
pub mod observer;
