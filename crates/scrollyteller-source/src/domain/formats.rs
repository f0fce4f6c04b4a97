//! Source format inference and structured-file parsing.

use scrollyteller_core::error::StoryError;
use serde_json::Value;

use super::delimited::parse_delimited;

/// The file formats a source path can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Comma-separated values.
    Csv,
    /// Tab-separated values.
    Tsv,
    /// A JSON array of objects.
    Json,
    /// A YAML sequence of mappings.
    Yaml,
}

impl SourceFormat {
    /// Infers the format from `path`'s extension.
    ///
    /// Query strings and fragments are ignored and the extension is matched
    /// case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::UnsupportedFormat` for any other extension.
    pub fn infer(path: &str) -> Result<Self, StoryError> {
        let bare = path.split(['?', '#']).next().unwrap_or(path);
        let file_name = bare.rsplit(['/', '\\']).next().unwrap_or(bare);
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("tsv") => Ok(Self::Tsv),
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(StoryError::UnsupportedFormat {
                path: path.to_owned(),
            }),
        }
    }

    /// Parses `text` into an array of records.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::Parse` for malformed input and
    /// `StoryError::InvalidNarrationShape` if a structured file is not an
    /// array at the top level.
    pub fn parse(self, text: &str, path: &str) -> Result<Vec<Value>, StoryError> {
        match self {
            Self::Csv => parse_delimited(text, ',', path),
            Self::Tsv => parse_delimited(text, '\t', path),
            Self::Json | Self::Yaml => parse_structured(text, self, path),
        }
    }
}

/// Parses a JSON or YAML document that must hold a top-level array.
///
/// # Errors
///
/// Returns `StoryError::Parse` if the document is malformed and
/// `StoryError::InvalidNarrationShape` if it is not an array.
pub fn parse_structured(
    text: &str,
    format: SourceFormat,
    path: &str,
) -> Result<Vec<Value>, StoryError> {
    let document: Value = match format {
        SourceFormat::Yaml => serde_yaml::from_str(text).map_err(|e| StoryError::Parse {
            path: path.to_owned(),
            reason: e.to_string(),
        })?,
        _ => serde_json::from_str(text).map_err(|e| StoryError::Parse {
            path: path.to_owned(),
            reason: e.to_string(),
        })?,
    };

    into_records(document, path)
}

/// Unwraps a resolved value into its array of records.
///
/// # Errors
///
/// Returns `StoryError::InvalidNarrationShape` if `value` is not an array.
pub fn into_records(value: Value, origin: &str) -> Result<Vec<Value>, StoryError> {
    match value {
        Value::Array(records) => Ok(records),
        other => Err(StoryError::InvalidNarrationShape(format!(
            "{origin} resolved to {}, expected an array",
            type_name(&other)
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_infer_recognizes_known_extensions() {
        assert_eq!(SourceFormat::infer("narration.csv").unwrap(), SourceFormat::Csv);
        assert_eq!(SourceFormat::infer("data/regions.TSV").unwrap(), SourceFormat::Tsv);
        assert_eq!(SourceFormat::infer("story.json").unwrap(), SourceFormat::Json);
        assert_eq!(SourceFormat::infer("story.yml").unwrap(), SourceFormat::Yaml);
        assert_eq!(SourceFormat::infer("story.yaml").unwrap(), SourceFormat::Yaml);
    }

    #[test]
    fn test_infer_ignores_query_and_fragment() {
        assert_eq!(
            SourceFormat::infer("narration.csv?v=3#top").unwrap(),
            SourceFormat::Csv
        );
    }

    #[test]
    fn test_infer_rejects_unknown_extension() {
        let result = SourceFormat::infer("narration.xlsx");

        match result.unwrap_err() {
            StoryError::UnsupportedFormat { path } => assert_eq!(path, "narration.xlsx"),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_infer_rejects_dot_in_directory_only() {
        assert!(SourceFormat::infer("data.v2/narration").is_err());
    }

    #[test]
    fn test_parse_json_array_of_records() {
        let text = r#"[{"trigger": "year:1950"}, {"trigger": "year:2008"}]"#;

        let records = SourceFormat::Json.parse(text, "n.json").unwrap();

        assert_eq!(
            records,
            vec![json!({"trigger": "year:1950"}), json!({"trigger": "year:2008"})]
        );
    }

    #[test]
    fn test_parse_yaml_sequence_of_mappings() {
        let text = "- region: Asia\n  population: 4.6\n- region: Europe\n  population: 0.75\n";

        let records = SourceFormat::Yaml.parse(text, "regions.yaml").unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["region"], "Asia");
        assert_eq!(records[1]["population"], 0.75);
    }

    #[test]
    fn test_parse_json_object_is_invalid_shape() {
        let result = SourceFormat::Json.parse(r#"{"trigger": "x"}"#, "n.json");

        match result.unwrap_err() {
            StoryError::InvalidNarrationShape(msg) => {
                assert!(msg.contains("n.json"));
                assert!(msg.contains("an object"));
            }
            other => panic!("expected InvalidNarrationShape, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_malformed_json_is_parse_error() {
        let result = SourceFormat::Json.parse("[{", "broken.json");

        match result.unwrap_err() {
            StoryError::Parse { path, .. } => assert_eq!(path, "broken.json"),
            other => panic!("expected Parse, got {other:?}"),
        }
    }
}
