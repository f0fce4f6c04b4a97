//! Source fetching abstraction.

use async_trait::async_trait;

use crate::error::StoryError;

/// Retrieves the raw text behind a source path.
///
/// Implementations report retrieval failures as `StoryError::Fetch`. Format
/// inference and parsing happen in the caller.
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    /// Fetch the contents of `path`.
    async fn fetch(&self, path: &str) -> Result<String, StoryError>;
}
