//! The render pipeline.
//!
//! Narration for every section resolves concurrently, then data for every
//! section resolves concurrently. Nothing is built until both phases have
//! succeeded for all sections, so a failure leaves no partially rendered
//! section behind.

use std::sync::Arc;

use scrollyteller_core::detector::StepBinding;
use scrollyteller_core::error::StoryError;
use scrollyteller_core::scaffold::ScaffoldRequest;
use scrollyteller_narrative::{NarrationEntry, build_entries};
use scrollyteller_scroller::ScrollObserver;
use scrollyteller_source::{Source, resolve_all};
use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::config::SectionConfig;
use crate::domain::section::{Section, SectionCallbacks, SectionView};
use crate::orchestrator::Collaborators;

/// Resolves, builds and attaches every section.
///
/// # Errors
///
/// Returns the first source resolution error (in section order), a
/// `StoryError::InvalidNarrationShape` for malformed narration rows, a
/// `StoryError::ConfigValidation` if scaffolding produced the wrong number of
/// steps, or any error raised by the step detector.
pub async fn render_sections(
    run_id: Uuid,
    container_id: &str,
    mut configs: Vec<SectionConfig>,
    collaborators: &Collaborators,
) -> Result<Vec<Section>, StoryError> {
    let narration_sources: Vec<Source> = configs
        .iter_mut()
        .map(|config| std::mem::take(&mut config.narration))
        .collect();
    let data_sources: Vec<Source> = configs
        .iter_mut()
        .map(|config| std::mem::take(&mut config.data))
        .collect();

    info!(%run_id, sections = configs.len(), "resolving narration");
    let narration_rows = resolve_all(narration_sources, Arc::clone(&collaborators.fetcher)).await?;

    info!(%run_id, "resolving data");
    let data_rows = resolve_all(data_sources, Arc::clone(&collaborators.fetcher)).await?;

    let narrations = configs
        .iter()
        .zip(narration_rows)
        .map(|(config, rows)| build_entries(rows, config.convert_trigger_to_object))
        .collect::<Result<Vec<_>, _>>()?;

    let mut sections = Vec::with_capacity(configs.len());
    for (position, ((config, narration), data)) in configs
        .into_iter()
        .zip(narrations)
        .zip(data_rows)
        .enumerate()
    {
        let section = build_section(container_id, position, config, narration, data, collaborators)?;
        debug!(
            %run_id,
            section_id = %section.id,
            graph_id = %section.graph_id,
            steps = section.narration.len(),
            records = section.data.len(),
            "section built"
        );
        sections.push(section);
    }

    Ok(sections)
}

fn build_section(
    container_id: &str,
    position: usize,
    config: SectionConfig,
    mut narration: Vec<NarrationEntry>,
    data: Vec<Value>,
    collaborators: &Collaborators,
) -> Result<Section, StoryError> {
    let SectionConfig {
        id,
        observer,
        reshape_data,
        build_graph,
        on_scroll,
        on_activate_narration,
        on_resize,
        ..
    } = config;

    let derived = reshape_data.map(|reshape| reshape(&data));

    let scaffold = collaborators.scaffolder.scaffold(&ScaffoldRequest {
        container_id,
        section_id: &id,
        section_index: position,
        narration: narration.iter().map(|entry| &entry.row).collect(),
    });
    if scaffold.steps.len() != narration.len() {
        return Err(StoryError::ConfigValidation(format!(
            "section {id} was scaffolded with {} steps for {} narration blocks",
            scaffold.steps.len(),
            narration.len()
        )));
    }
    for (entry, element) in narration.iter_mut().zip(&scaffold.steps) {
        entry.bind_element(element);
    }

    let build_graph = build_graph.ok_or_else(|| {
        StoryError::ConfigValidation(format!("section {id} has no graph constructor"))
    })?;
    let graph = build_graph(
        &scaffold.graph_id,
        &SectionView {
            id: &id,
            position,
            graph_id: &scaffold.graph_id,
            narration: &narration,
            data: &data,
            derived: derived.as_ref(),
        },
    );

    let scroller = ScrollObserver::new(id.clone(), &scaffold.steps);
    collaborators.detector.attach(&StepBinding {
        container_id,
        section_id: &id,
        graph_id: &scaffold.graph_id,
        steps: &scaffold.steps,
        options: observer,
    })?;

    Ok(Section {
        graph_id: scaffold.graph_id.clone(),
        id,
        position,
        narration,
        data,
        derived,
        graph,
        scroller,
        scaffold,
        callbacks: SectionCallbacks {
            on_scroll,
            on_activate_narration,
            on_resize,
        },
    })
}
