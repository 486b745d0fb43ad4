use anyhow::Result;
use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::handoff::HandoffSpec;
use crate::models::message::ModelInput;
use crate::models::response::{ModelResponse, StreamEvent};
use crate::tool::ToolSpec;

/// Sampling parameters forwarded to providers that support them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelSettings {
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub max_tokens: Option<i32>,
}

/// Whether the host wants provider-side traces recorded for this call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTracing {
    Disabled,
    Enabled,
    EnabledWithoutData,
}

/// Base trait for model providers (remote APIs, local models, or a human at
/// a keyboard). The host framework depends on this abstraction, never on a
/// concrete provider.
#[async_trait]
pub trait Model: Send + Sync {
    /// Generate the next assistant message for the given context.
    #[allow(clippy::too_many_arguments)]
    async fn get_response(
        &self,
        system_instructions: Option<&str>,
        input: ModelInput,
        settings: &ModelSettings,
        tools: &[Box<dyn ToolSpec>],
        output_schema: Option<&Value>,
        handoffs: &[Box<dyn HandoffSpec>],
        tracing: ModelTracing,
        previous_response_id: Option<&str>,
        conversation_id: Option<&str>,
        prompt: Option<&Value>,
    ) -> Result<ModelResponse>;

    /// Stream the response as it is produced. The stream is finite and
    /// cannot be restarted; nothing runs until it is first polled.
    #[allow(clippy::too_many_arguments)]
    fn stream_response<'a>(
        &'a self,
        system_instructions: Option<&'a str>,
        input: ModelInput,
        settings: &'a ModelSettings,
        tools: &'a [Box<dyn ToolSpec>],
        output_schema: Option<&'a Value>,
        handoffs: &'a [Box<dyn HandoffSpec>],
        tracing: ModelTracing,
        previous_response_id: Option<&'a str>,
        conversation_id: Option<&'a str>,
        prompt: Option<&'a Value>,
    ) -> BoxStream<'a, Result<StreamEvent>>;
}
