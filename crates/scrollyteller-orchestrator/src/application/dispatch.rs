//! Step event dispatch.

use scrollyteller_core::error::StoryError;
use scrollyteller_scroller::{ScrollEvent, StepDispatch};
use tracing::debug;

use crate::domain::context::StepContext;
use crate::domain::section::{Section, SectionView};

/// Feeds `event` through the section's observer and invokes the matching
/// user callback.
///
/// Callback panics are not caught.
///
/// # Errors
///
/// Returns `StoryError::UnknownStep` if the event's index is out of range.
pub fn dispatch_step_event(section: &mut Section, event: &ScrollEvent) -> Result<(), StoryError> {
    let Some(dispatch) = section.scroller.observe(event)? else {
        return Ok(());
    };

    let Section {
        id,
        position,
        narration,
        data,
        derived,
        graph_id,
        graph,
        callbacks,
        ..
    } = section;

    let (index, direction, progress, callback) = match dispatch {
        StepDispatch::Activate { index, direction } => {
            (index, direction, 0.0, callbacks.on_activate_narration.as_ref())
        }
        StepDispatch::Scroll {
            index,
            direction,
            progress,
        } => (index, direction, progress, callbacks.on_scroll.as_ref()),
    };

    let Some(callback) = callback else {
        debug!(section_id = %id, index, "no callback registered for step dispatch");
        return Ok(());
    };

    let entry = &narration[index];
    callback(StepContext {
        index,
        progress,
        element: entry.element(),
        trigger: &entry.trigger,
        state: entry.state.as_ref(),
        direction,
        graph_id: graph_id.as_str(),
        section: SectionView {
            id: id.as_str(),
            position: *position,
            graph_id: graph_id.as_str(),
            narration: narration.as_slice(),
            data: data.as_slice(),
            derived: derived.as_ref(),
        },
        graph: &mut **graph,
    });

    Ok(())
}
