//! User-supplied story configuration.

use std::collections::HashSet;
use std::fmt;

use scrollyteller_core::detector::ObserverOptions;
use scrollyteller_core::error::StoryError;
use scrollyteller_core::graph::GraphHandle;
use scrollyteller_source::Source;
use serde_json::Value;

use super::context::{ResizeContext, StepContext};
use super::section::SectionView;

/// Derives a section's graph configuration from its resolved data.
pub type ReshapeFn = Box<dyn Fn(&[Value]) -> Value + Send + Sync>;

/// Builds a section's graph given its graph element id.
pub type BuildGraphFn = Box<dyn Fn(&str, &SectionView<'_>) -> Box<dyn GraphHandle> + Send + Sync>;

/// Receives activation or scroll progress for a narration block.
pub type StepCallback = Box<dyn Fn(StepContext<'_>) + Send + Sync>;

/// Receives container resizes.
pub type ResizeCallback = Box<dyn Fn(ResizeContext<'_>) + Send + Sync>;

/// Configuration for one section.
pub struct SectionConfig {
    /// Unique section identifier.
    pub id: String,
    /// Narration source. Required.
    pub narration: Source,
    /// Data source. Resolves to an empty array when undefined.
    pub data: Source,
    /// Whether each trigger is decomposed into a key/value state.
    pub convert_trigger_to_object: bool,
    /// Step detection tuning.
    pub observer: ObserverOptions,
    /// Optional data reshaping applied once after resolution.
    pub reshape_data: Option<ReshapeFn>,
    /// Graph constructor. Required.
    pub build_graph: Option<BuildGraphFn>,
    /// Called continuously while a step is active.
    pub on_scroll: Option<StepCallback>,
    /// Called when a narration block becomes active.
    pub on_activate_narration: Option<StepCallback>,
    /// Called on container resize. Without it the graph is resized directly.
    pub on_resize: Option<ResizeCallback>,
}

impl SectionConfig {
    /// Creates a section with no sources and no callbacks.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            narration: Source::Undefined,
            data: Source::Undefined,
            convert_trigger_to_object: false,
            observer: ObserverOptions::default(),
            reshape_data: None,
            build_graph: None,
            on_scroll: None,
            on_activate_narration: None,
            on_resize: None,
        }
    }

    /// Sets the narration source.
    #[must_use]
    pub fn with_narration(mut self, source: impl Into<Source>) -> Self {
        self.narration = source.into();
        self
    }

    /// Sets the data source.
    #[must_use]
    pub fn with_data(mut self, source: impl Into<Source>) -> Self {
        self.data = source.into();
        self
    }

    /// Enables or disables trigger decomposition.
    #[must_use]
    pub fn convert_trigger_to_object(mut self, enabled: bool) -> Self {
        self.convert_trigger_to_object = enabled;
        self
    }

    /// Sets the step detection tuning.
    #[must_use]
    pub fn with_observer_options(mut self, options: ObserverOptions) -> Self {
        self.observer = options;
        self
    }

    /// Sets the data reshaping function.
    #[must_use]
    pub fn with_reshape<F>(mut self, reshape: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.reshape_data = Some(Box::new(reshape));
        self
    }

    /// Sets the graph constructor.
    #[must_use]
    pub fn with_graph<F>(mut self, build: F) -> Self
    where
        F: Fn(&str, &SectionView<'_>) -> Box<dyn GraphHandle> + Send + Sync + 'static,
    {
        self.build_graph = Some(Box::new(build));
        self
    }

    /// Sets the scroll progress callback.
    #[must_use]
    pub fn on_scroll<F>(mut self, callback: F) -> Self
    where
        F: Fn(StepContext<'_>) + Send + Sync + 'static,
    {
        self.on_scroll = Some(Box::new(callback));
        self
    }

    /// Sets the narration activation callback.
    #[must_use]
    pub fn on_activate_narration<F>(mut self, callback: F) -> Self
    where
        F: Fn(StepContext<'_>) + Send + Sync + 'static,
    {
        self.on_activate_narration = Some(Box::new(callback));
        self
    }

    /// Sets the resize callback.
    #[must_use]
    pub fn on_resize<F>(mut self, callback: F) -> Self
    where
        F: Fn(ResizeContext<'_>) + Send + Sync + 'static,
    {
        self.on_resize = Some(Box::new(callback));
        self
    }
}

impl fmt::Debug for SectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionConfig")
            .field("id", &self.id)
            .field("narration", &self.narration)
            .field("data", &self.data)
            .field("convert_trigger_to_object", &self.convert_trigger_to_object)
            .field("observer", &self.observer)
            .field("reshape_data", &self.reshape_data.is_some())
            .field("build_graph", &self.build_graph.is_some())
            .field("on_scroll", &self.on_scroll.is_some())
            .field("on_activate_narration", &self.on_activate_narration.is_some())
            .field("on_resize", &self.on_resize.is_some())
            .finish()
    }
}

/// Configuration for a whole story.
#[derive(Debug)]
pub struct OrchestratorConfig {
    /// The element the story is mounted into.
    pub container_id: String,
    /// Sections in page order.
    pub sections: Vec<SectionConfig>,
}

impl OrchestratorConfig {
    /// Creates a story configuration.
    #[must_use]
    pub fn new(container_id: impl Into<String>, sections: Vec<SectionConfig>) -> Self {
        Self {
            container_id: container_id.into(),
            sections,
        }
    }

    /// Checks required fields and identifier uniqueness.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::ConfigValidation` describing the first problem.
    pub fn validate(&self) -> Result<(), StoryError> {
        if self.container_id.trim().is_empty() {
            return Err(StoryError::ConfigValidation(
                "container id must not be empty".to_owned(),
            ));
        }

        let mut seen = HashSet::new();
        for (position, section) in self.sections.iter().enumerate() {
            if section.id.trim().is_empty() {
                return Err(StoryError::ConfigValidation(format!(
                    "section {position} has an empty identifier"
                )));
            }
            if !seen.insert(section.id.as_str()) {
                return Err(StoryError::ConfigValidation(format!(
                    "duplicate section identifier: {}",
                    section.id
                )));
            }
            if section.narration.is_undefined() {
                return Err(StoryError::ConfigValidation(format!(
                    "section {} has no narration source",
                    section.id
                )));
            }
            if section.build_graph.is_none() {
                return Err(StoryError::ConfigValidation(format!(
                    "section {} has no graph constructor",
                    section.id
                )));
            }
            if !(0.0..=1.0).contains(&section.observer.offset) {
                return Err(StoryError::ConfigValidation(format!(
                    "section {} has observer offset {} outside [0, 1]",
                    section.id, section.observer.offset
                )));
            }
        }

        Ok(())
    }
}
