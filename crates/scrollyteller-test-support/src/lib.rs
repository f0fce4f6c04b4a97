//! Shared test doubles and utilities for the Scrollyteller orchestrator.

mod collaborators;
mod fetcher;
mod graph;

pub use collaborators::{MockStep, RecordedBinding, RecordingDetector, RecordingScaffolder};
pub use fetcher::{FailingFetcher, InMemoryFetcher};
pub use graph::{GraphCall, GraphLog, RecordingGraph};
