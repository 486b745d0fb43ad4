use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Read-only view of a tool as it is presented to a model.
///
/// The host framework's own tool types implement this so a provider can
/// display them without knowing anything about execution. Implementations
/// that carry no stable configured name should return their type name.
pub trait ToolSpec: Send + Sync {
    /// The name the model invokes the tool by.
    fn name(&self) -> &str;

    /// A short description of what the tool does, if one exists.
    fn description(&self) -> Option<&str> {
        None
    }
}

/// A tool that can be used by a model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tool {
    /// The name of the tool
    pub name: String,
    /// A description of what the tool does
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parameters that the tool accepts
    pub parameters: Value,
}

impl Tool {
    /// Create a new tool with the given name and description
    pub fn new<N, D>(name: N, description: D, parameters: Value) -> Self
    where
        N: Into<String>,
        D: Into<String>,
    {
        Tool {
            name: name.into(),
            description: Some(description.into()),
            parameters,
        }
    }
}

impl ToolSpec for Tool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// A tool call request that the host can execute
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCall {
    /// The name of the tool to execute
    pub name: String,
    /// The parameters for the execution
    pub parameters: Value,
}

impl ToolCall {
    /// Create a new ToolCall with the given name and parameters
    pub fn new<S: Into<String>>(name: S, parameters: Value) -> Self {
        Self {
            name: name.into(),
            parameters,
        }
    }
}
