//! Story manifests.
//!
//! A manifest describes a story in YAML or JSON: the container id and, per
//! section, where its narration and data come from plus the trigger key that
//! drives the preview graph.

use std::path::Path;

use scrollyteller_core::detector::ObserverOptions;
use scrollyteller_source::Source;
use serde::Deserialize;
use serde_json::Value;

use crate::error::AppError;

/// A whole story.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StoryManifest {
    /// Identifier of the story container.
    pub container_id: String,
    /// Sections in document order.
    #[serde(default)]
    pub sections: Vec<SectionManifest>,
}

/// One section of a story.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SectionManifest {
    /// Section identifier.
    pub id: String,
    /// Narration rows: a path or inline records.
    pub narration: SourceRef,
    /// Data records: a path or inline records.
    #[serde(default)]
    pub data: Option<SourceRef>,
    /// Whether `trigger` strings are decomposed into key/value state.
    #[serde(default)]
    pub convert_trigger_to_object: bool,
    /// Trigger state key whose value drives the graph cursor.
    #[serde(default)]
    pub cursor_key: Option<String>,
    /// Detection line position within the viewport.
    #[serde(default)]
    pub offset: Option<f64>,
    /// Whether progress notifications are wanted.
    #[serde(default)]
    pub progress: Option<bool>,
}

/// Where a section's records come from.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SourceRef {
    /// A file relative to the story root.
    Path(String),
    /// Records written directly in the manifest.
    Inline(Vec<Value>),
}

impl SourceRef {
    /// Converts the reference into an orchestrator source.
    #[must_use]
    pub fn to_source(&self) -> Source {
        match self {
            Self::Path(path) => Source::path(path.clone()),
            Self::Inline(records) => Source::array(records.clone()),
        }
    }
}

impl SectionManifest {
    /// Returns the observer options, falling back to defaults per field.
    #[must_use]
    pub fn observer_options(&self) -> ObserverOptions {
        let defaults = ObserverOptions::default();
        ObserverOptions {
            offset: self.offset.unwrap_or(defaults.offset),
            progress: self.progress.unwrap_or(defaults.progress),
        }
    }
}

impl StoryManifest {
    /// Reads and parses the manifest at `path`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Manifest` if the file cannot be read or parsed.
    pub async fn load(path: &Path) -> Result<Self, AppError> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::Manifest {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        Self::parse(&text, path)
    }

    /// Parses manifest text, choosing JSON for `.json` files and YAML
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Manifest` if the text is malformed.
    pub fn parse(text: &str, path: &Path) -> Result<Self, AppError> {
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let parsed = if is_json {
            serde_json::from_str(text).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str(text).map_err(|e| e.to_string())
        };

        parsed.map_err(|reason| AppError::Manifest {
            path: path.display().to_string(),
            reason,
        })
    }
}
