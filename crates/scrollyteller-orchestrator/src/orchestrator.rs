//! The story orchestrator.

use std::fmt;
use std::sync::Arc;

use scrollyteller_core::detector::StepDetector;
use scrollyteller_core::error::StoryError;
use scrollyteller_core::fetch::SourceFetcher;
use scrollyteller_core::graph::Dimensions;
use scrollyteller_core::scaffold::SectionScaffolder;
use scrollyteller_scroller::ScrollEvent;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::application::dispatch::dispatch_step_event;
use crate::application::render::render_sections;
use crate::application::resize::resize_section;
use crate::domain::config::{OrchestratorConfig, SectionConfig};
use crate::domain::section::Section;

/// External capabilities the orchestrator drives.
#[derive(Clone)]
pub struct Collaborators {
    /// Retrieves source files.
    pub fetcher: Arc<dyn SourceFetcher>,
    /// Builds each section's elements.
    pub scaffolder: Arc<dyn SectionScaffolder>,
    /// Observes step elements.
    pub detector: Arc<dyn StepDetector>,
}

impl fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}

/// Where the orchestrator is in its one-shot lifecycle.
enum Lifecycle {
    Configured(Vec<SectionConfig>),
    Rendering,
    Rendered(Vec<Section>),
    Failed,
}

/// Marks a render that never completed, such as one whose future was
/// dropped mid-await, as failed.
struct RenderGuard<'a> {
    lifecycle: &'a mut Lifecycle,
}

impl Drop for RenderGuard<'_> {
    fn drop(&mut self) {
        if matches!(self.lifecycle, Lifecycle::Rendering) {
            warn!("story render abandoned before completion");
            *self.lifecycle = Lifecycle::Failed;
        }
    }
}

/// Drives a story: resolves sources, builds sections, dispatches events.
pub struct Orchestrator {
    container_id: String,
    collaborators: Collaborators,
    lifecycle: Lifecycle,
}

impl Orchestrator {
    /// Validates `config` and prepares an orchestrator for rendering.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::ConfigValidation` if the configuration is invalid.
    /// No source is touched before validation succeeds.
    pub fn new(config: OrchestratorConfig, collaborators: Collaborators) -> Result<Self, StoryError> {
        config.validate()?;

        Ok(Self {
            container_id: config.container_id,
            collaborators,
            lifecycle: Lifecycle::Configured(config.sections),
        })
    }

    /// Returns the story container id.
    #[must_use]
    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    /// Returns whether `render()` has completed successfully.
    #[must_use]
    pub fn is_rendered(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Rendered(_))
    }

    /// Returns the rendered sections, or an empty slice before a successful
    /// render.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        match &self.lifecycle {
            Lifecycle::Rendered(sections) => sections,
            _ => &[],
        }
    }

    /// Looks up a rendered section by identifier.
    #[must_use]
    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.sections().iter().find(|section| section.id == section_id)
    }

    /// Resolves every section's sources and builds its graph and observer.
    ///
    /// Rendering happens once. On failure nothing is kept: the resolved
    /// narration and data of sections that did succeed are discarded. A
    /// render whose future is dropped before completing counts as failed.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::ConfigValidation` if called more than once, or
    /// the first error raised while resolving or building sections.
    #[instrument(skip(self), fields(container_id = %self.container_id))]
    pub async fn render(&mut self) -> Result<(), StoryError> {
        let configs = match std::mem::replace(&mut self.lifecycle, Lifecycle::Rendering) {
            Lifecycle::Configured(configs) => configs,
            other => {
                self.lifecycle = other;
                return Err(StoryError::ConfigValidation(
                    "render() may only be called once".to_owned(),
                ));
            }
        };

        let run_id = Uuid::new_v4();
        info!(%run_id, sections = configs.len(), "rendering story");

        let guard = RenderGuard {
            lifecycle: &mut self.lifecycle,
        };
        match render_sections(run_id, &self.container_id, configs, &self.collaborators).await {
            Ok(sections) => {
                info!(%run_id, sections = sections.len(), "story rendered");
                *guard.lifecycle = Lifecycle::Rendered(sections);
                Ok(())
            }
            Err(e) => {
                warn!(%run_id, error = %e, "story render failed");
                *guard.lifecycle = Lifecycle::Failed;
                Err(e)
            }
        }
    }

    /// Applies a step notification to `section_id` and runs the matching
    /// callback.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::NotRendered` before a successful render,
    /// `StoryError::SectionNotFound` for an unknown section and
    /// `StoryError::UnknownStep` for an out-of-range step.
    #[instrument(skip(self, event), fields(event_type = event.event_type(), index = event.index()))]
    pub fn handle_scroll_event(
        &mut self,
        section_id: &str,
        event: ScrollEvent,
    ) -> Result<(), StoryError> {
        let section = self.section_mut(section_id)?;
        dispatch_step_event(section, &event)
    }

    /// Resizes every section's graph for new container dimensions.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::NotRendered` before a successful render.
    #[instrument(skip(self))]
    pub fn handle_resize(&mut self, container: Dimensions) -> Result<(), StoryError> {
        let Lifecycle::Rendered(sections) = &mut self.lifecycle else {
            return Err(StoryError::NotRendered);
        };

        for section in sections.iter_mut() {
            resize_section(section, container);
        }
        Ok(())
    }

    fn section_mut(&mut self, section_id: &str) -> Result<&mut Section, StoryError> {
        let Lifecycle::Rendered(sections) = &mut self.lifecycle else {
            return Err(StoryError::NotRendered);
        };

        sections
            .iter_mut()
            .find(|section| section.id == section_id)
            .ok_or_else(|| StoryError::SectionNotFound(section_id.to_owned()))
    }
}

impl fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lifecycle = match &self.lifecycle {
            Lifecycle::Configured(_) => "configured",
            Lifecycle::Rendering => "rendering",
            Lifecycle::Rendered(_) => "rendered",
            Lifecycle::Failed => "failed",
        };
        f.debug_struct("Orchestrator")
            .field("container_id", &self.container_id)
            .field("lifecycle", &lifecycle)
            .field("sections", &self.sections())
            .finish()
    }
}
