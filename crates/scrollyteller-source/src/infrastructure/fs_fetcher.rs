//! Filesystem-backed source fetcher.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use scrollyteller_core::error::StoryError;
use scrollyteller_core::fetch::SourceFetcher;
use tracing::debug;

/// Reads source paths relative to a root directory.
#[derive(Debug, Clone)]
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    /// Create a fetcher rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn locate(&self, path: &str) -> PathBuf {
        let bare = path.split(['?', '#']).next().unwrap_or(path);
        self.root.join(bare.trim_start_matches('/'))
    }
}

#[async_trait]
impl SourceFetcher for FsFetcher {
    async fn fetch(&self, path: &str) -> Result<String, StoryError> {
        let location = self.locate(path);
        debug!(path, location = %location.display(), "reading source file");

        tokio::fs::read_to_string(&location)
            .await
            .map_err(|e| StoryError::Fetch {
                path: path.to_owned(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_root() -> PathBuf {
        std::env::temp_dir().join(format!("scrollyteller-fs-fetcher-{}", std::process::id()))
    }

    #[tokio::test]
    async fn test_fetch_reads_file_relative_to_root() {
        // Arrange
        let root = fixture_root();
        tokio::fs::create_dir_all(root.join("data")).await.unwrap();
        tokio::fs::write(root.join("data/regions.csv"), "region\nAsia\n")
            .await
            .unwrap();
        let fetcher = FsFetcher::new(&root);

        // Act
        let text = fetcher.fetch("/data/regions.csv?v=2").await.unwrap();

        // Assert
        assert_eq!(text, "region\nAsia\n");
        tokio::fs::remove_dir_all(&root).await.unwrap();
    }

    #[tokio::test]
    async fn test_fetch_missing_file_is_fetch_error() {
        let fetcher = FsFetcher::new(std::env::temp_dir().join("scrollyteller-does-not-exist"));

        let result = fetcher.fetch("narration.csv").await;

        match result.unwrap_err() {
            StoryError::Fetch { path, .. } => assert_eq!(path, "narration.csv"),
            other => panic!("expected Fetch, got {other:?}"),
        }
    }
}
