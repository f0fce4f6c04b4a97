//! Assembly of narration entries from resolved rows.

use scrollyteller_core::error::StoryError;
use serde_json::Value;
use tracing::debug;

use crate::domain::entry::NarrationEntry;

/// Builds step-ordered narration entries from resolved rows.
///
/// # Errors
///
/// Returns `StoryError::InvalidNarrationShape` for the first row that is not
/// a valid narration record.
pub fn build_entries(rows: Vec<Value>, decompose: bool) -> Result<Vec<NarrationEntry>, StoryError> {
    let entries = rows
        .into_iter()
        .enumerate()
        .map(|(index, row)| NarrationEntry::from_row(index, row, decompose))
        .collect::<Result<Vec<_>, _>>()?;

    let dropped: usize = entries.iter().map(|entry| entry.dropped_tokens).sum();
    if dropped > 0 {
        debug!(dropped, "malformed trigger tokens dropped");
    }

    Ok(entries)
}
