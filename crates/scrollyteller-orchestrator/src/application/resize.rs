//! Container resize handling.

use scrollyteller_core::graph::{Dimensions, RESIZE_FRACTION};
use tracing::debug;

use crate::domain::context::ResizeContext;
use crate::domain::section::{Section, SectionView};

/// Resizes one section's graph to a fixed fraction of the container.
///
/// A registered resize callback takes over entirely; otherwise the graph's
/// own `resize` is called.
pub fn resize_section(section: &mut Section, container: Dimensions) {
    let graph_dimensions = container.scaled(RESIZE_FRACTION);

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

    debug!(
        section_id = %id,
        width = graph_dimensions.width,
        height = graph_dimensions.height,
        "resizing section"
    );

    match callbacks.on_resize.as_ref() {
        Some(callback) => callback(ResizeContext {
            container,
            graph_dimensions,
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
        }),
        None => graph.resize(graph_dimensions),
    }
}
