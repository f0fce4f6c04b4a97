//! Scrollyteller — scroll observation context.
//!
//! Translates raw step notifications from the detection capability into
//! activation and progress dispatches, while owning each section's
//! active-step and last-progress state.

pub mod domain;

pub use domain::events::ScrollEvent;
pub use domain::observer::{ScrollObserver, StepDispatch, StepPhase};
