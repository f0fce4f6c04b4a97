//! Test fetchers — mock `SourceFetcher` implementations for tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use scrollyteller_core::error::StoryError;
use scrollyteller_core::fetch::SourceFetcher;

/// A fetcher serving files from memory. Paths can be given a delay or set to
/// fail, and every request and successful completion is recorded.
#[derive(Debug, Default)]
pub struct InMemoryFetcher {
    files: HashMap<String, (String, Duration)>,
    failures: HashMap<String, Duration>,
    requested: Mutex<Vec<String>>,
    completed: Mutex<Vec<String>>,
}

impl InMemoryFetcher {
    /// Create a fetcher with no files.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `contents` for `path` immediately.
    #[must_use]
    pub fn with_file(self, path: &str, contents: &str) -> Self {
        self.with_delayed_file(path, contents, Duration::ZERO)
    }

    /// Serve `contents` for `path` after `delay`.
    #[must_use]
    pub fn with_delayed_file(mut self, path: &str, contents: &str, delay: Duration) -> Self {
        self.files
            .insert(path.to_owned(), (contents.to_owned(), delay));
        self
    }

    /// Fail every fetch of `path` immediately.
    #[must_use]
    pub fn with_failure(self, path: &str) -> Self {
        self.with_delayed_failure(path, Duration::ZERO)
    }

    /// Fail every fetch of `path` after `delay`.
    #[must_use]
    pub fn with_delayed_failure(mut self, path: &str, delay: Duration) -> Self {
        self.failures.insert(path.to_owned(), delay);
        self
    }

    /// Returns every path requested so far, in request order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn requested_paths(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }

    /// Returns every path served successfully, in completion order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn completed_paths(&self) -> Vec<String> {
        self.completed.lock().unwrap().clone()
    }
}

#[async_trait]
impl SourceFetcher for InMemoryFetcher {
    async fn fetch(&self, path: &str) -> Result<String, StoryError> {
        self.requested.lock().unwrap().push(path.to_owned());

        if let Some(delay) = self.failures.get(path) {
            tokio::time::sleep(*delay).await;
            return Err(StoryError::Fetch {
                path: path.to_owned(),
                reason: "connection refused".to_owned(),
            });
        }

        let Some((contents, delay)) = self.files.get(path) else {
            return Err(StoryError::Fetch {
                path: path.to_owned(),
                reason: "not found".to_owned(),
            });
        };

        tokio::time::sleep(*delay).await;
        self.completed.lock().unwrap().push(path.to_owned());
        Ok(contents.clone())
    }
}

/// A fetcher that always fails. Useful for proving a code path never fetches.
#[derive(Debug)]
pub struct FailingFetcher;

#[async_trait]
impl SourceFetcher for FailingFetcher {
    async fn fetch(&self, path: &str) -> Result<String, StoryError> {
        Err(StoryError::Fetch {
            path: path.to_owned(),
            reason: "connection refused".to_owned(),
        })
    }
}
