//! Scrollyteller Core — shared abstractions.
//!
//! This crate defines the capability traits the orchestrator drives (graphs,
//! step elements, source fetching, scaffolding, step detection) and the error
//! taxonomy every context shares. It contains no infrastructure code.

pub mod detector;
pub mod direction;
pub mod element;
pub mod error;
pub mod fetch;
pub mod graph;
pub mod scaffold;
