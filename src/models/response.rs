use serde::{Deserialize, Serialize};

use super::content::OutputContent;
use super::role::Role;
use crate::tool::Tool;

/// Token accounting for a single model call.
///
/// Manual interactions never consume tokens, so providers in this crate
/// always report the zeroed [`Usage::default`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: i32,
    pub output_tokens: i32,
    pub total_tokens: i32,
    pub cached_tokens: i32,
    pub reasoning_tokens: i32,
}

/// Completion state of an output message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    InProgress,
    Completed,
    Incomplete,
}

/// How the model is allowed to pick tools.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolChoice {
    /// Tool selection disabled.
    #[default]
    None,
    Auto,
    Required,
}

/// A single assistant message produced by a model call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseMessage {
    pub id: String,
    pub role: Role,
    pub status: MessageStatus,
    pub content: Vec<OutputContent>,
}

impl ResponseMessage {
    /// Concatenated text of every text segment.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(OutputContent::as_text)
            .collect()
    }
}

/// The full response envelope, as carried inside stream events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub id: String,
    pub created_at: i64,
    pub model: String,
    pub output: Vec<ResponseMessage>,
    pub usage: Usage,
    pub tool_choice: ToolChoice,
    pub tools: Vec<Tool>,
    pub parallel_tool_calls: bool,
}

/// What a non-streamed model call resolves to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelResponse {
    pub output: Vec<ResponseMessage>,
    pub usage: Usage,
    pub response_id: String,
}

/// Events produced by a streaming model call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// The terminal event, carrying the whole response at once.
    Completed { sequence_number: u64, response: Response },
}
