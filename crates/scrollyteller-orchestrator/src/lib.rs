//! Scrollyteller — scroll narrative orchestration.
//!
//! Resolves every section's narration and data, builds each section's graph
//! and scroll observer, and dispatches step and resize events to the user
//! callbacks with a per-section context.

pub mod application;
pub mod domain;
pub mod orchestrator;

pub use domain::config::{OrchestratorConfig, SectionConfig};
pub use domain::context::{ResizeContext, StepContext};
pub use domain::section::{Section, SectionView};
pub use orchestrator::{Collaborators, Orchestrator};
