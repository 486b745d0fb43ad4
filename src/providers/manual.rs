use std::future::Future;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Result;
use async_stream::try_stream;
use async_trait::async_trait;
use futures::future::BoxFuture;
use futures::stream::BoxStream;
use futures::FutureExt;
use serde_json::Value;
use tracing::debug;

use crate::errors::{ModelError, ModelResult};
use crate::handoff::HandoffSpec;
use crate::models::content::OutputContent;
use crate::models::message::ModelInput;
use crate::models::response::{
    MessageStatus, ModelResponse, Response, ResponseMessage, StreamEvent, ToolChoice, Usage,
};
use crate::models::role::Role;
use crate::providers::base::{Model, ModelSettings, ModelTracing};
use crate::tool::ToolSpec;

/// Response id attached to every manual interaction.
pub const MANUAL_RESPONSE_ID: &str = "manual-response";
/// Message id attached to every manual interaction.
pub const MANUAL_MESSAGE_ID: &str = "manual-message";
/// Model name reported in the response envelope.
pub const MANUAL_MODEL_NAME: &str = "manual";

/// Sink for transcript lines, invoked once per line.
pub type PrintFn = Arc<dyn Fn(&str) + Send + Sync>;

/// Supplier of the next manually entered reply.
pub type ResponseProvider = Arc<dyn Fn() -> BoxFuture<'static, Result<String>> + Send + Sync>;

fn format_tools(tools: &[Box<dyn ToolSpec>]) -> Vec<String> {
    tools
        .iter()
        .map(|tool| match tool.description().filter(|d| !d.is_empty()) {
            Some(description) => format!("  - {}: {}", tool.name(), description),
            None => format!("  - {}", tool.name()),
        })
        .collect()
}

fn format_handoffs(handoffs: &[Box<dyn HandoffSpec>]) -> Vec<String> {
    handoffs
        .iter()
        .map(|handoff| {
            let target = format!(
                "  - {} via `{}`",
                handoff.agent_name(),
                handoff.invocation_name()
            );
            match handoff.description().filter(|d| !d.is_empty()) {
                Some(description) => format!("{target}: {description}"),
                None => target,
            }
        })
        .collect()
}

fn read_reply_blocking() -> ModelResult<String> {
    let mut stdout = io::stdout();
    write!(stdout, "Manual response: ")?;
    stdout.flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Err(ModelError::InputClosed);
    }
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(line)
}

/// Read one line from stdin on a worker thread so the async scheduler is
/// never blocked on the console.
async fn default_response_provider() -> Result<String> {
    let reply = tokio::task::spawn_blocking(read_reply_blocking).await??;
    Ok(reply)
}

fn build_output_message(text: &str) -> ResponseMessage {
    ResponseMessage {
        id: MANUAL_MESSAGE_ID.to_string(),
        role: Role::Assistant,
        status: MessageStatus::Completed,
        content: vec![OutputContent::text(text)],
    }
}

fn build_envelope(message: ResponseMessage, usage: Usage) -> Response {
    Response {
        id: MANUAL_RESPONSE_ID.to_string(),
        created_at: 0,
        model: MANUAL_MODEL_NAME.to_string(),
        output: vec![message],
        usage,
        tool_choice: ToolChoice::None,
        tools: Vec::new(),
        parallel_tool_calls: false,
    }
}

fn build_completed_event(message: ResponseMessage, usage: Usage) -> StreamEvent {
    StreamEvent::Completed {
        sequence_number: 0,
        response: build_envelope(message, usage),
    }
}

/// A model implementation that asks a human for every reply.
///
/// The conversation context is printed through `print_fn` and the next
/// assistant message is read from `response_provider`. Defaults talk to the
/// terminal: stdout for the transcript, a blocking stdin read for the reply.
/// Each call is an independent interaction; nothing is cached or retried.
pub struct ManualModel {
    print_fn: PrintFn,
    response_provider: Option<ResponseProvider>,
}

impl ManualModel {
    /// Create a manual model wired to stdout and stdin.
    pub fn new() -> Self {
        Self {
            print_fn: Arc::new(|line| println!("{line}")),
            response_provider: None,
        }
    }

    /// Replace the transcript sink.
    pub fn with_print_fn<F>(mut self, print_fn: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.print_fn = Arc::new(print_fn);
        self
    }

    /// Replace the reply supplier.
    pub fn with_response_provider<F, Fut>(mut self, provider: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String>> + Send + 'static,
    {
        self.response_provider = Some(Arc::new(move || provider().boxed()));
        self
    }

    /// Print the interaction transcript, then wait for the reply.
    ///
    /// Section order is fixed and the header and fallback lines are exact;
    /// consumers treat the transcript as a wire format.
    async fn interact(
        &self,
        system_instructions: Option<&str>,
        input: ModelInput,
        tools: &[Box<dyn ToolSpec>],
        handoffs: &[Box<dyn HandoffSpec>],
        prompt: Option<&Value>,
    ) -> Result<String> {
        let items = input.into_items();
        debug!(
            items = items.len(),
            tools = tools.len(),
            handoffs = handoffs.len(),
            "starting manual interaction"
        );

        let print = self.print_fn.as_ref();
        print("=== Manual model interaction ===");

        match system_instructions {
            Some(instructions) if !instructions.is_empty() => {
                print("System instructions:");
                print(instructions);
            }
            _ => print("System instructions: <none>"),
        }

        print("Conversation items:");
        print(&serde_json::to_string_pretty(&items)?);

        if let Some(prompt) = prompt {
            print("Prompt configuration:");
            print(&serde_json::to_string_pretty(prompt)?);
        }

        if tools.is_empty() {
            print("Available tools: none");
        } else {
            print("Available tools:");
            for line in format_tools(tools) {
                print(&line);
            }
        }

        if handoffs.is_empty() {
            print("Available handoffs: none");
        } else {
            print("Available handoffs:");
            for line in format_handoffs(handoffs) {
                print(&line);
            }
        }

        print("Provide the next assistant message.");

        let reply = match &self.response_provider {
            Some(provider) => provider().await?,
            None => default_response_provider().await?,
        };
        debug!(chars = reply.len(), "captured manual reply");
        Ok(reply)
    }
}

impl Default for ManualModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Model for ManualModel {
    async fn get_response(
        &self,
        system_instructions: Option<&str>,
        input: ModelInput,
        _settings: &ModelSettings,
        tools: &[Box<dyn ToolSpec>],
        _output_schema: Option<&Value>,
        handoffs: &[Box<dyn HandoffSpec>],
        _tracing: ModelTracing,
        _previous_response_id: Option<&str>,
        _conversation_id: Option<&str>,
        prompt: Option<&Value>,
    ) -> Result<ModelResponse> {
        let text = self
            .interact(system_instructions, input, tools, handoffs, prompt)
            .await?;

        Ok(ModelResponse {
            output: vec![build_output_message(&text)],
            usage: Usage::default(),
            response_id: MANUAL_RESPONSE_ID.to_string(),
        })
    }

    fn stream_response<'a>(
        &'a self,
        system_instructions: Option<&'a str>,
        input: ModelInput,
        _settings: &'a ModelSettings,
        tools: &'a [Box<dyn ToolSpec>],
        _output_schema: Option<&'a Value>,
        handoffs: &'a [Box<dyn HandoffSpec>],
        _tracing: ModelTracing,
        _previous_response_id: Option<&'a str>,
        _conversation_id: Option<&'a str>,
        prompt: Option<&'a Value>,
    ) -> BoxStream<'a, Result<StreamEvent>> {
        // There is no partial output to stream; the whole reply arrives as
        // the single completed event.
        Box::pin(try_stream! {
            let text = self
                .interact(system_instructions, input, tools, handoffs, prompt)
                .await?;
            let message = build_output_message(&text);
            yield build_completed_event(message, Usage::default());
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handoff::Handoff;
    use crate::tool::Tool;
    use serde_json::json;
    use std::sync::Mutex;

    fn capturing_model(replies: &'static str) -> (Arc<Mutex<Vec<String>>>, ManualModel) {
        let printed = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&printed);
        let model = ManualModel::new()
            .with_print_fn(move |line| sink.lock().unwrap().push(line.to_string()))
            .with_response_provider(move || async move { Ok(replies.to_string()) });
        (printed, model)
    }

    #[test]
    fn test_format_tools_with_and_without_description() {
        let tools: Vec<Box<dyn ToolSpec>> = vec![
            Box::new(Tool::new(
                "get_weather",
                "Get the weather for a location",
                json!({}),
            )),
            Box::new(Tool {
                name: "noop".to_string(),
                description: None,
                parameters: json!({}),
            }),
        ];

        let lines = format_tools(&tools);
        assert_eq!(
            lines,
            vec![
                "  - get_weather: Get the weather for a location".to_string(),
                "  - noop".to_string(),
            ]
        );
    }

    #[test]
    fn test_format_tools_preserves_order() {
        let tools: Vec<Box<dyn ToolSpec>> = ["first", "second", "third"]
            .iter()
            .map(|name| Box::new(Tool::new(*name, "", json!({}))) as Box<dyn ToolSpec>)
            .collect();

        let lines = format_tools(&tools);
        assert_eq!(lines.len(), 3);
        for (line, name) in lines.iter().zip(["first", "second", "third"]) {
            assert!(line.contains(name));
        }
    }

    #[test]
    fn test_empty_description_counts_as_absent() {
        let tools: Vec<Box<dyn ToolSpec>> = vec![Box::new(Tool::new("bare", "", json!({})))];
        assert_eq!(format_tools(&tools), vec!["  - bare".to_string()]);
    }

    #[test]
    fn test_format_handoffs() {
        let handoffs: Vec<Box<dyn HandoffSpec>> = vec![
            Box::new(
                Handoff::new("Helper", "transfer_to_helper")
                    .with_description("Transfer to helper agent."),
            ),
            Box::new(Handoff::new("Escalation", "transfer_to_escalation")),
        ];

        let lines = format_handoffs(&handoffs);
        assert_eq!(
            lines,
            vec![
                "  - Helper via `transfer_to_helper`: Transfer to helper agent.".to_string(),
                "  - Escalation via `transfer_to_escalation`".to_string(),
            ]
        );
    }

    #[test]
    fn test_format_empty_inputs() {
        assert!(format_tools(&[]).is_empty());
        assert!(format_handoffs(&[]).is_empty());
    }

    #[test]
    fn test_transcript_section_order() {
        let (printed, model) = capturing_model("ok");
        let tools: Vec<Box<dyn ToolSpec>> = vec![Box::new(Tool::new("probe", "Probes.", json!({})))];
        let handoffs: Vec<Box<dyn HandoffSpec>> = Vec::new();

        let reply = tokio_test::block_on(model.interact(
            Some("Be concise."),
            ModelInput::from("hi"),
            &tools,
            &handoffs,
            None,
        ))
        .unwrap();
        assert_eq!(reply, "ok");

        let printed = printed.lock().unwrap();
        assert_eq!(printed[0], "=== Manual model interaction ===");
        assert_eq!(printed[1], "System instructions:");
        assert_eq!(printed[2], "Be concise.");
        assert_eq!(printed[3], "Conversation items:");
        assert_eq!(
            printed.last().map(String::as_str),
            Some("Provide the next assistant message.")
        );

        let tools_at = printed.iter().position(|l| l == "Available tools:").unwrap();
        let handoffs_at = printed
            .iter()
            .position(|l| l == "Available handoffs: none")
            .unwrap();
        assert!(tools_at < handoffs_at);
        assert_eq!(printed[tools_at + 1], "  - probe: Probes.");
    }

    #[test]
    fn test_transcript_fallback_lines() {
        let (printed, model) = capturing_model("ok");
        let tools: Vec<Box<dyn ToolSpec>> = Vec::new();
        let handoffs: Vec<Box<dyn HandoffSpec>> = Vec::new();

        tokio_test::block_on(model.interact(
            None,
            ModelInput::from("hi"),
            &tools,
            &handoffs,
            None,
        ))
        .unwrap();

        let printed = printed.lock().unwrap();
        assert!(printed.contains(&"System instructions: <none>".to_string()));
        assert!(printed.contains(&"Available tools: none".to_string()));
        assert!(printed.contains(&"Available handoffs: none".to_string()));
        assert!(!printed.iter().any(|l| l == "Prompt configuration:"));
    }

    #[test]
    fn test_empty_system_instructions_fall_back() {
        let (printed, model) = capturing_model("ok");
        let tools: Vec<Box<dyn ToolSpec>> = Vec::new();
        let handoffs: Vec<Box<dyn HandoffSpec>> = Vec::new();

        tokio_test::block_on(model.interact(
            Some(""),
            ModelInput::from("hi"),
            &tools,
            &handoffs,
            None,
        ))
        .unwrap();

        let printed = printed.lock().unwrap();
        assert!(printed.contains(&"System instructions: <none>".to_string()));
    }

    #[test]
    fn test_prompt_configuration_section() {
        let (printed, model) = capturing_model("ok");
        let tools: Vec<Box<dyn ToolSpec>> = Vec::new();
        let handoffs: Vec<Box<dyn HandoffSpec>> = Vec::new();
        let prompt = json!({"id": "prompt-7", "version": "2"});

        tokio_test::block_on(model.interact(
            None,
            ModelInput::from("hi"),
            &tools,
            &handoffs,
            Some(&prompt),
        ))
        .unwrap();

        let printed = printed.lock().unwrap();
        assert!(printed.contains(&"Prompt configuration:".to_string()));
        assert!(printed.iter().any(|l| l.contains("prompt-7")));
    }

    #[test]
    fn test_build_output_message() {
        let message = build_output_message("Manual reply");
        assert_eq!(message.id, MANUAL_MESSAGE_ID);
        assert_eq!(message.role, Role::Assistant);
        assert_eq!(message.status, MessageStatus::Completed);
        assert_eq!(message.content, vec![OutputContent::text("Manual reply")]);
    }

    #[test]
    fn test_build_completed_event() {
        let event = build_completed_event(build_output_message("hi"), Usage::default());
        let StreamEvent::Completed {
            sequence_number,
            response,
        } = event;
        assert_eq!(sequence_number, 0);
        assert_eq!(response.id, MANUAL_RESPONSE_ID);
        assert_eq!(response.created_at, 0);
        assert_eq!(response.model, MANUAL_MODEL_NAME);
        assert_eq!(response.usage, Usage::default());
        assert_eq!(response.tool_choice, ToolChoice::None);
        assert!(response.tools.is_empty());
        assert!(!response.parallel_tool_calls);
        assert_eq!(response.output.len(), 1);
    }
}
