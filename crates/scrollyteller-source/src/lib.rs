//! Scrollyteller — source resolution context.
//!
//! Normalizes narration and data sources (file path, literal array, or
//! pending asynchronous value) into resolved arrays of records, parsing
//! delimited and structured files by extension.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::resolver::{resolve, resolve_all};
pub use domain::formats::SourceFormat;
pub use domain::source::{PendingSource, Source};
pub use infrastructure::fs_fetcher::FsFetcher;
