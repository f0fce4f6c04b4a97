//! Orchestration error types.

use thiserror::Error;

/// Top-level error type for story orchestration.
#[derive(Debug, Error)]
pub enum StoryError {
    /// Missing required fields, duplicate identifiers, or misuse of the
    /// orchestrator lifecycle.
    #[error("configuration error: {0}")]
    ConfigValidation(String),

    /// A source path whose extension maps to no known format.
    #[error("unsupported source format: {path}")]
    UnsupportedFormat {
        /// The offending source path.
        path: String,
    },

    /// Retrieving a source path failed.
    #[error("failed to fetch {path}: {reason}")]
    Fetch {
        /// The source path that was requested.
        path: String,
        /// Underlying failure description.
        reason: String,
    },

    /// A source was retrieved but could not be parsed in its inferred format.
    #[error("failed to parse {path}: {reason}")]
    Parse {
        /// The source path that was parsed.
        path: String,
        /// Underlying failure description.
        reason: String,
    },

    /// A resolved source is not an array of records.
    #[error("invalid narration shape: {0}")]
    InvalidNarrationShape(String),

    /// An event addressed a section identifier that does not exist.
    #[error("section not found: {0}")]
    SectionNotFound(String),

    /// An event addressed a step index outside the section's narration.
    #[error("unknown step {index} in section {section_id}")]
    UnknownStep {
        /// The section the event was addressed to.
        section_id: String,
        /// The out-of-range step index.
        index: usize,
    },

    /// Scroll or resize events arrived before `render()` completed.
    #[error("orchestrator has not been rendered")]
    NotRendered,
}
