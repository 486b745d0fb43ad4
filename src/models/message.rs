use serde::{Deserialize, Serialize};

use super::role::Role;
use crate::tool::ToolCall;

/// One normalized turn of the conversation as handed to a provider.
///
/// Handoff invocations travel as tool calls; the host framework resolves
/// which calls are transfers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputItem {
    /// A plain message attributed to a role.
    Message { role: Role, content: String },
    /// The model asked for a tool invocation.
    ToolCall { id: String, call: ToolCall },
    /// The host ran a tool and this is what came back.
    ToolOutput { id: String, output: String },
}

impl InputItem {
    /// Create a system message item
    pub fn system<S: Into<String>>(content: S) -> Self {
        InputItem::Message {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a user message item
    pub fn user<S: Into<String>>(content: S) -> Self {
        InputItem::Message {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant message item
    pub fn assistant<S: Into<String>>(content: S) -> Self {
        InputItem::Message {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Create a tool call item
    pub fn tool_call<S: Into<String>>(id: S, call: ToolCall) -> Self {
        InputItem::ToolCall {
            id: id.into(),
            call,
        }
    }

    /// Create a tool output item
    pub fn tool_output<S: Into<String>, T: Into<String>>(id: S, output: T) -> Self {
        InputItem::ToolOutput {
            id: id.into(),
            output: output.into(),
        }
    }
}

/// Caller-facing input to a model call: bare text or pre-built items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModelInput {
    /// A single user utterance.
    Text(String),
    /// An explicit ordered sequence of conversation items.
    Items(Vec<InputItem>),
}

impl ModelInput {
    /// Normalize to the canonical ordered item list. Bare text becomes a
    /// single user message; explicit items pass through untouched.
    pub fn into_items(self) -> Vec<InputItem> {
        match self {
            ModelInput::Text(text) => vec![InputItem::user(text)],
            ModelInput::Items(items) => items,
        }
    }
}

impl From<&str> for ModelInput {
    fn from(text: &str) -> Self {
        ModelInput::Text(text.to_string())
    }
}

impl From<String> for ModelInput {
    fn from(text: String) -> Self {
        ModelInput::Text(text)
    }
}

impl From<Vec<InputItem>> for ModelInput {
    fn from(items: Vec<InputItem>) -> Self {
        ModelInput::Items(items)
    }
}
