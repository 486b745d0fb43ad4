use serde::{Deserialize, Serialize};

/// A segment of model output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputContent {
    Text { text: String },
}

impl OutputContent {
    pub fn text<S: Into<String>>(text: S) -> Self {
        OutputContent::Text { text: text.into() }
    }

    /// Get the text if this is a Text segment
    pub fn as_text(&self) -> Option<&str> {
        match self {
            OutputContent::Text { text } => Some(text),
        }
    }
}
