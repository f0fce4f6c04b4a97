//! Source resolution.
//!
//! Turns a `Source` into a resolved array of records. `resolve_all` fans the
//! work for every section out onto the runtime and fans the results back in
//! once all of them have settled.

use std::sync::Arc;

use scrollyteller_core::error::StoryError;
use scrollyteller_core::fetch::SourceFetcher;
use serde_json::Value;
use tokio::task::JoinSet;
use tracing::{debug, instrument};

use crate::domain::formats::{SourceFormat, into_records};
use crate::domain::source::Source;

/// Resolves a single source into an array of records.
///
/// Arrays are returned as-is, paths are fetched and parsed according to their
/// extension, pending values are awaited and must settle to an array, and an
/// undefined source resolves to an empty array.
///
/// # Errors
///
/// Returns `StoryError::UnsupportedFormat` for unrecognized extensions,
/// `StoryError::Fetch` if retrieval fails, `StoryError::Parse` for malformed
/// files, and `StoryError::InvalidNarrationShape` if the result is not an
/// array.
#[instrument(skip(source, fetcher), fields(kind = source.kind()))]
pub async fn resolve(source: Source, fetcher: &dyn SourceFetcher) -> Result<Vec<Value>, StoryError> {
    let records = match source {
        Source::Undefined => Vec::new(),
        Source::Array(records) => records,
        Source::Path(path) => {
            let format = SourceFormat::infer(&path)?;
            let text = fetcher.fetch(&path).await?;
            format.parse(&text, &path)?
        }
        Source::Pending(pending) => into_records(pending.await?, "pending source")?,
    };

    debug!(records = records.len(), "source resolved");
    Ok(records)
}

/// Resolves every source concurrently, preserving input order.
///
/// A failing source does not cancel its siblings: all resolutions run to
/// completion before the outcome is decided. If any failed, the error of the
/// earliest failing source (in input order) is returned and every resolved
/// array is discarded.
///
/// # Errors
///
/// Returns the first `StoryError` in input order, as produced by `resolve`.
///
/// # Panics
///
/// Re-raises a panic from a fetcher or pending future on the caller.
pub async fn resolve_all(
    sources: Vec<Source>,
    fetcher: Arc<dyn SourceFetcher>,
) -> Result<Vec<Vec<Value>>, StoryError> {
    let mut tasks = JoinSet::new();
    let total = sources.len();

    for (position, source) in sources.into_iter().enumerate() {
        let fetcher = Arc::clone(&fetcher);
        tasks.spawn(async move { (position, resolve(source, fetcher.as_ref()).await) });
    }

    let mut settled: Vec<Option<Result<Vec<Value>, StoryError>>> =
        std::iter::repeat_with(|| None).take(total).collect();

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((position, outcome)) => settled[position] = Some(outcome),
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => {
                return Err(StoryError::Fetch {
                    path: "<source task>".to_owned(),
                    reason: e.to_string(),
                });
            }
        }
    }

    settled
        .into_iter()
        .map(|outcome| {
            outcome.unwrap_or_else(|| {
                Err(StoryError::Fetch {
                    path: "<source task>".to_owned(),
                    reason: "resolution never settled".to_owned(),
                })
            })
        })
        .collect()
}
