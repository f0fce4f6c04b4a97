//! Narration and data sources.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use scrollyteller_core::error::StoryError;
use serde_json::Value;

/// An asynchronous value that should settle to an array of records.
pub type PendingSource = Pin<Box<dyn Future<Output = Result<Value, StoryError>> + Send + 'static>>;

/// Where a section's narration or data comes from.
#[derive(Default)]
pub enum Source {
    /// No source given. Resolves to an empty array.
    #[default]
    Undefined,
    /// A file path whose extension selects the parser.
    Path(String),
    /// Records already in memory.
    Array(Vec<Value>),
    /// A value still being produced elsewhere.
    Pending(PendingSource),
}

impl Source {
    /// A file-backed source.
    #[must_use]
    pub fn path(path: impl Into<String>) -> Self {
        Self::Path(path.into())
    }

    /// An in-memory source.
    #[must_use]
    pub fn array(records: Vec<Value>) -> Self {
        Self::Array(records)
    }

    /// A source backed by a future.
    #[must_use]
    pub fn pending<F>(future: F) -> Self
    where
        F: Future<Output = Result<Value, StoryError>> + Send + 'static,
    {
        Self::Pending(Box::pin(future))
    }

    /// Returns `true` when no source was given.
    #[must_use]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Short description for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Path(_) => "path",
            Self::Array(_) => "array",
            Self::Pending(_) => "pending",
        }
    }
}

impl From<Vec<Value>> for Source {
    fn from(records: Vec<Value>) -> Self {
        Self::Array(records)
    }
}

impl From<&str> for Source {
    fn from(path: &str) -> Self {
        Self::Path(path.to_owned())
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("Undefined"),
            Self::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Self::Array(records) => f.debug_tuple("Array").field(&records.len()).finish(),
            Self::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}
