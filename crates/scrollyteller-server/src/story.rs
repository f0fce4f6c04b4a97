//! Building an orchestrator from a manifest.

use std::path::Path;
use std::sync::Arc;

use scrollyteller_core::error::StoryError;
use scrollyteller_core::graph::{DedupedGraph, GraphHandle, RenderRequest};
use scrollyteller_orchestrator::{
    Collaborators, Orchestrator, OrchestratorConfig, SectionConfig, StepContext,
};
use scrollyteller_source::FsFetcher;
use serde_json::{Number, Value};

use crate::graph::GraphRegistry;
use crate::manifest::{SectionManifest, StoryManifest};
use crate::scaffold::{HeadlessScaffolder, RemoteDetector};

/// An unrendered story with the handles the server reads back.
#[derive(Debug)]
pub struct Story {
    /// The orchestrator, ready for `render()`.
    pub orchestrator: Orchestrator,
    /// Graph snapshots, filled in as the story renders.
    pub graphs: GraphRegistry,
    /// Observer options per attached section.
    pub detector: Arc<RemoteDetector>,
}

/// Builds an orchestrator for `manifest` whose sources are read from `root`.
///
/// # Errors
///
/// Returns `StoryError::ConfigValidation` if the manifest describes an
/// invalid story, including a `cursor_key` on a section whose triggers are
/// not decomposed.
pub fn build_story(manifest: &StoryManifest, root: &Path) -> Result<Story, StoryError> {
    let graphs = GraphRegistry::new();
    let detector = Arc::new(RemoteDetector::new());

    let sections = manifest
        .sections
        .iter()
        .map(|section| section_config(section, &graphs))
        .collect::<Result<Vec<_>, _>>()?;

    let collaborators = Collaborators {
        fetcher: Arc::new(FsFetcher::new(root)),
        scaffolder: Arc::new(HeadlessScaffolder),
        detector: Arc::clone(&detector) as _,
    };
    let orchestrator = Orchestrator::new(
        OrchestratorConfig::new(manifest.container_id.clone(), sections),
        collaborators,
    )?;

    Ok(Story {
        orchestrator,
        graphs,
        detector,
    })
}

fn section_config(section: &SectionManifest, graphs: &GraphRegistry) -> Result<SectionConfig, StoryError> {
    let registry = graphs.clone();
    let mut config = SectionConfig::new(section.id.clone())
        .with_narration(section.narration.to_source())
        .convert_trigger_to_object(section.convert_trigger_to_object)
        .with_observer_options(section.observer_options())
        .with_graph(move |graph_id, _| {
            Box::new(DedupedGraph::new(registry.timeline(graph_id))) as Box<dyn GraphHandle>
        });
    if let Some(data) = &section.data {
        config = config.with_data(data.to_source());
    }

    let Some(cursor_key) = section.cursor_key.clone() else {
        return Ok(config);
    };
    if !section.convert_trigger_to_object {
        return Err(StoryError::ConfigValidation(format!(
            "section {} sets cursor_key but does not convert triggers to objects",
            section.id
        )));
    }

    let activate_key = cursor_key.clone();
    Ok(config
        .on_activate_narration(move |ctx: StepContext<'_>| {
            if let Some(value) = ctx.state_value(&activate_key) {
                let cursor = cursor_value(value);
                ctx.graph.render(&RenderRequest::on_activate(cursor));
            }
        })
        .on_scroll(move |ctx: StepContext<'_>| {
            if let Some(cursor) = scroll_cursor(&ctx, &cursor_key) {
                ctx.graph.render(&RenderRequest::on_scroll(cursor));
            }
        }))
}

/// Interprets a trigger value as a number when it reads as one.
fn cursor_value(raw: &str) -> Value {
    raw.parse::<f64>()
        .ok()
        .and_then(numeric_cursor)
        .unwrap_or_else(|| Value::String(raw.to_owned()))
}

/// Whole values are emitted as integers so the same position always yields
/// an equal cursor, whether it came from activation or from scrolling.
#[allow(clippy::cast_possible_truncation)]
fn numeric_cursor(value: f64) -> Option<Value> {
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        return Some(Value::from(value as i64));
    }
    Number::from_f64(value).map(Value::Number)
}

/// Moves the cursor from the active step's value towards the next step's,
/// in proportion to scroll progress. Non-numeric values hold still.
fn scroll_cursor(ctx: &StepContext<'_>, key: &str) -> Option<Value> {
    let current = ctx.state_value(key)?;
    let next = ctx
        .section
        .narration
        .get(ctx.index + 1)
        .and_then(|entry| entry.state_value(key));

    let (Ok(from), Some(Ok(to))) = (current.parse::<f64>(), next.map(str::parse::<f64>)) else {
        return Some(cursor_value(current));
    };

    numeric_cursor(from + (to - from) * ctx.progress)
}
