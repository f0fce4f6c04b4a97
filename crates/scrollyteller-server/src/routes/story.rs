//! Routes for previewing a rendered story.
//!
//! Step and resize notifications are posted by the client that owns the
//! viewport; every mutating route answers with the affected section's state
//! so the client can see what the graph now shows.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use scrollyteller_core::detector::ObserverOptions;
use scrollyteller_core::direction::Direction;
use scrollyteller_core::error::StoryError;
use scrollyteller_core::graph::Dimensions;
use scrollyteller_narrative::TriggerState;
use scrollyteller_orchestrator::{Orchestrator, Section};
use scrollyteller_scroller::ScrollEvent;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::graph::GraphSnapshot;
use crate::state::AppState;

/// One narration step as seen by the client.
#[derive(Debug, Serialize)]
pub struct StepSummary {
    /// Position within the section.
    pub index: usize,
    /// Raw trigger string.
    pub trigger: String,
    /// Decomposed trigger, when enabled for the section.
    pub state: Option<TriggerState>,
    /// Whether this is the section's current step.
    pub active: bool,
}

/// A section and what its graph currently shows.
#[derive(Debug, Serialize)]
pub struct SectionSummary {
    /// Section identifier.
    pub id: String,
    /// Position within the story.
    pub position: usize,
    /// Graph element identifier.
    pub graph_id: String,
    /// Narration steps.
    pub steps: Vec<StepSummary>,
    /// Number of data records.
    pub records: usize,
    /// Index of the current step.
    pub active_step: Option<usize>,
    /// Last progress applied to the current step.
    pub progress: f64,
    /// Options the section was attached with.
    pub observer: Option<ObserverOptions>,
    /// Current graph state.
    pub graph: Option<GraphSnapshot>,
}

/// Response body for GET /.
#[derive(Debug, Serialize)]
pub struct StoryResponse {
    /// Story container identifier.
    pub container_id: String,
    /// Whether rendering completed.
    pub rendered: bool,
    /// Sections in document order.
    pub sections: Vec<SectionSummary>,
}

/// Response body for GET /sections/{id}/data.
#[derive(Debug, Serialize)]
pub struct SectionDataResponse {
    /// Section identifier.
    pub section_id: String,
    /// Resolved data records.
    pub records: Vec<Value>,
    /// Output of the section's reshape function, if any.
    pub derived: Option<Value>,
}

/// Request body for POST /sections/{id}/step-enter and /step-exit.
#[derive(Debug, Deserialize)]
pub struct StepRequest {
    /// Step index.
    pub index: usize,
    /// Scroll direction.
    pub direction: Direction,
}

/// Request body for POST /sections/{id}/step-progress.
#[derive(Debug, Deserialize)]
pub struct StepProgressRequest {
    /// Step index.
    pub index: usize,
    /// Scroll direction.
    pub direction: Direction,
    /// Progress through the step, in `[0, 1]`.
    pub progress: f64,
}

/// Request body for POST /resize.
#[derive(Debug, Deserialize)]
pub struct ResizeRequest {
    /// New container width.
    pub width: f64,
    /// New container height.
    pub height: f64,
}

fn summarize(state: &AppState, section: &Section) -> SectionSummary {
    let scroller = section.scroller();
    SectionSummary {
        id: section.id().to_owned(),
        position: section.position(),
        graph_id: section.graph_id().to_owned(),
        steps: section
            .narration()
            .iter()
            .map(|entry| StepSummary {
                index: entry.index,
                trigger: entry.trigger.clone(),
                state: entry.state.clone(),
                active: scroller.is_active(entry.index),
            })
            .collect(),
        records: section.data().len(),
        active_step: scroller.active_index(),
        progress: scroller.last_progress(),
        observer: state.detector.options(section.id()),
        graph: state.graphs.snapshot(section.graph_id()),
    }
}

fn story_response(state: &AppState, orchestrator: &Orchestrator) -> StoryResponse {
    StoryResponse {
        container_id: orchestrator.container_id().to_owned(),
        rendered: orchestrator.is_rendered(),
        sections: orchestrator
            .sections()
            .iter()
            .map(|section| summarize(state, section))
            .collect(),
    }
}

async fn apply_step_event(
    state: &AppState,
    section_id: &str,
    event: ScrollEvent,
) -> Result<Json<SectionSummary>, ApiError> {
    let correlation_id = Uuid::new_v4();
    info!(%correlation_id, event_type = event.event_type(), index = event.index(), "applying step event");

    let mut orchestrator = state.orchestrator.lock().await;
    orchestrator.handle_scroll_event(section_id, event)?;

    let section = orchestrator
        .section(section_id)
        .ok_or_else(|| StoryError::SectionNotFound(section_id.to_owned()))?;
    Ok(Json(summarize(state, section)))
}

/// GET /
#[instrument(skip(state))]
async fn get_story(State(state): State<AppState>) -> Json<StoryResponse> {
    let orchestrator = state.orchestrator.lock().await;
    Json(story_response(&state, &orchestrator))
}

/// GET /sections/{id}/data
#[instrument(skip(state))]
async fn get_section_data(
    State(state): State<AppState>,
    Path(section_id): Path<String>,
) -> Result<Json<SectionDataResponse>, ApiError> {
    let orchestrator = state.orchestrator.lock().await;
    if !orchestrator.is_rendered() {
        return Err(StoryError::NotRendered.into());
    }
    let section = orchestrator
        .section(&section_id)
        .ok_or_else(|| StoryError::SectionNotFound(section_id.clone()))?;

    Ok(Json(SectionDataResponse {
        section_id: section.id().to_owned(),
        records: section.data().to_vec(),
        derived: section.derived().cloned(),
    }))
}

/// POST /sections/{id}/step-enter
#[instrument(skip(state, request), fields(index = request.index))]
async fn step_enter(
    State(state): State<AppState>,
    Path(section_id): Path<String>,
    Json(request): Json<StepRequest>,
) -> Result<Json<SectionSummary>, ApiError> {
    let event = ScrollEvent::StepEnter {
        index: request.index,
        direction: request.direction,
    };
    apply_step_event(&state, &section_id, event).await
}

/// POST /sections/{id}/step-exit
#[instrument(skip(state, request), fields(index = request.index))]
async fn step_exit(
    State(state): State<AppState>,
    Path(section_id): Path<String>,
    Json(request): Json<StepRequest>,
) -> Result<Json<SectionSummary>, ApiError> {
    let event = ScrollEvent::StepExit {
        index: request.index,
        direction: request.direction,
    };
    apply_step_event(&state, &section_id, event).await
}

/// POST /sections/{id}/step-progress
#[instrument(skip(state, request), fields(index = request.index))]
async fn step_progress(
    State(state): State<AppState>,
    Path(section_id): Path<String>,
    Json(request): Json<StepProgressRequest>,
) -> Result<Json<SectionSummary>, ApiError> {
    if !(0.0..=1.0).contains(&request.progress) {
        return Err(StoryError::ConfigValidation(format!(
            "progress {} is outside [0, 1]",
            request.progress
        ))
        .into());
    }

    let event = ScrollEvent::StepProgress {
        index: request.index,
        direction: request.direction,
        progress: request.progress,
    };
    apply_step_event(&state, &section_id, event).await
}

/// POST /resize
#[instrument(skip(state, request), fields(width = request.width, height = request.height))]
async fn resize(
    State(state): State<AppState>,
    Json(request): Json<ResizeRequest>,
) -> Result<Json<StoryResponse>, ApiError> {
    let mut orchestrator = state.orchestrator.lock().await;
    orchestrator.handle_resize(Dimensions::new(request.width, request.height))?;
    Ok(Json(story_response(&state, &orchestrator)))
}

/// Returns the router for the story preview.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_story))
        .route("/sections/{id}/data", get(get_section_data))
        .route("/sections/{id}/step-enter", post(step_enter))
        .route("/sections/{id}/step-exit", post(step_exit))
        .route("/sections/{id}/step-progress", post(step_progress))
        .route("/resize", post(resize))
}
