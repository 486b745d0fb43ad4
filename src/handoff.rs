use serde::{Deserialize, Serialize};

/// Read-only view of a handoff target as it is presented to a model.
///
/// A handoff looks like a tool from the model's side; invoking it transfers
/// the conversation to another agent. Routing itself is the host's job.
pub trait HandoffSpec: Send + Sync {
    /// Name of the agent that receives the conversation.
    fn agent_name(&self) -> &str;

    /// The tool-style name the model invokes to trigger the transfer.
    fn invocation_name(&self) -> &str;

    /// A short description of when to hand off, if one exists.
    fn description(&self) -> Option<&str> {
        None
    }
}

/// A transfer target another agent can receive the conversation through.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Handoff {
    pub agent_name: String,
    pub invocation_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Handoff {
    /// Create a new handoff to the named agent
    pub fn new<A, I>(agent_name: A, invocation_name: I) -> Self
    where
        A: Into<String>,
        I: Into<String>,
    {
        Handoff {
            agent_name: agent_name.into(),
            invocation_name: invocation_name.into(),
            description: None,
        }
    }

    /// Set the description shown next to the target
    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl HandoffSpec for Handoff {
    fn agent_name(&self) -> &str {
        &self.agent_name
    }

    fn invocation_name(&self) -> &str {
        &self.invocation_name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
