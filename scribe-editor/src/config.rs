use crate::{EditorError, EditorResult};
use scribe_annotations::AnnotationPolicy;
use serde::{Deserialize, Serialize};

/// Editor configuration. Every field is optional in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Placeholder shown in an empty editor.
    pub placeholder: String,
    /// Placeholder shown in the description input.
    pub description_placeholder: String,
    /// Whether an empty description may be confirmed.
    pub allow_empty_descriptions: bool,
    /// Whether the read-only mirror of the store's document is maintained.
    pub show_mirror: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            placeholder: "Enter some text...".to_string(),
            description_placeholder: "Please enter your description".to_string(),
            allow_empty_descriptions: true,
            show_mirror: true,
        }
    }
}

impl EditorConfig {
    /// Parses a configuration from JSON, filling omitted fields with defaults.
    pub fn from_json(json: &str) -> EditorResult<Self> {
        serde_json::from_str(json).map_err(EditorError::Config)
    }

    #[must_use]
    pub fn annotation_policy(&self) -> AnnotationPolicy {
        AnnotationPolicy {
            allow_empty_descriptions: self.allow_empty_descriptions,
        }
    }
}
