//! Agent runner with tool calling loop.

use super::tools::{parse_tool_call, tool_definitions, ToolContext};
use crate::error::{Result, SvarError};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessageArgs,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestToolMessageArgs, ChatCompletionRequestUserMessageArgs,
    ChatCompletionResponseMessage, CreateChatCompletionRequestArgs,
};
use tracing::{debug, info};

/// Behavioral description for the video Q&A agent.
const DEFAULT_SYSTEM_PROMPT: &str = r#"You are a YouTube agent. Obtain the captions of a YouTube video and answer questions about its content.

You have a tool to fetch the caption track of a video. Fetch the captions
before answering so your answer is grounded in what is actually said.

Provide concise, focused answers and use markdown formatting for better readability."#;

/// Single-use agent bound to the caption-fetching capability.
///
/// Constructed fresh per question with an explicit API key; no state is
/// shared between runs.
pub struct Agent {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    tools: ToolContext,
    max_iterations: usize,
    system_prompt: String,
}

impl Agent {
    /// Create a new agent authenticated with the given API key.
    pub fn new(api_key: &str, tools: ToolContext, model: &str) -> Self {
        Self {
            client: create_client(api_key),
            model: model.to_string(),
            tools,
            max_iterations: 10,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }

    /// Set a custom system prompt.
    pub fn with_system_prompt(mut self, prompt: &str) -> Self {
        self.system_prompt = prompt.to_string();
        self
    }

    /// Set maximum iterations for the agent loop.
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    /// Run the agent with a prompt until it produces a final reply.
    pub async fn run(&self, prompt: &str) -> Result<AgentResponse> {
        let mut messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.system_prompt.clone())
                .build()
                .map_err(|e| SvarError::Agent(e.to_string()))?
                .into(),
        ];

        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt.to_string())
                .build()
                .map_err(|e| SvarError::Agent(e.to_string()))?
                .into(),
        );

        let mut iterations = 0;
        let mut tool_calls_made = Vec::new();

        loop {
            iterations += 1;
            if iterations > self.max_iterations {
                return Err(SvarError::Agent(format!(
                    "Agent exceeded maximum iterations ({})",
                    self.max_iterations
                )));
            }

            debug!("Agent iteration {}", iterations);

            let request = CreateChatCompletionRequestArgs::default()
                .model(&self.model)
                .messages(messages.clone())
                .tools(tool_definitions())
                .build()
                .map_err(|e| SvarError::Agent(e.to_string()))?;

            let response = self
                .client
                .chat()
                .create(request)
                .await
                .map_err(|e| SvarError::OpenAI(format!("Agent API error: {}", e)))?;

            let choice = response
                .choices
                .first()
                .ok_or_else(|| SvarError::Agent("No response from model".to_string()))?;

            // Check if the model wants to call tools
            if let Some(ref tool_calls) = choice.message.tool_calls {
                if tool_calls.is_empty() {
                    // No tool calls, treat as final reply
                    return self.build_response(&choice.message, tool_calls_made, iterations);
                }

                // Add assistant message with tool calls to history
                let assistant_msg = ChatCompletionRequestAssistantMessageArgs::default()
                    .tool_calls(tool_calls.clone())
                    .build()
                    .map_err(|e| SvarError::Agent(e.to_string()))?;
                messages.push(assistant_msg.into());

                // Execute each tool call
                for tool_call in tool_calls {
                    let record = self.execute_tool_call(tool_call).await;

                    let tool_msg = ChatCompletionRequestToolMessageArgs::default()
                        .tool_call_id(&tool_call.id)
                        .content(record.result.clone())
                        .build()
                        .map_err(|e| SvarError::Agent(e.to_string()))?;
                    messages.push(tool_msg.into());

                    tool_calls_made.push(record);
                }
            } else {
                // No tool calls - the model is done, return the final reply
                return self.build_response(&choice.message, tool_calls_made, iterations);
            }
        }
    }

    /// Execute a single tool call and return a record of it.
    async fn execute_tool_call(&self, tool_call: &ChatCompletionMessageToolCall) -> ToolCallRecord {
        let name = &tool_call.function.name;
        let arguments = &tool_call.function.arguments;

        info!("Agent calling tool: {} with args: {}", name, arguments);

        let result = match parse_tool_call(name, arguments) {
            Ok(tool) => match self.tools.execute(&tool).await {
                Ok(output) => output,
                Err(e) => format!("Tool error: {}", e),
            },
            Err(e) => format!("Failed to parse tool call: {}", e),
        };

        ToolCallRecord {
            name: name.clone(),
            arguments: arguments.clone(),
            result,
        }
    }

    /// Build the final agent response.
    ///
    /// The runtime's reply shape is not fixed across tool-call paths, so
    /// it is normalized into a tagged variant here, at the boundary.
    fn build_response(
        &self,
        message: &ChatCompletionResponseMessage,
        tool_calls: Vec<ToolCallRecord>,
        iterations: usize,
    ) -> Result<AgentResponse> {
        let reply = match &message.content {
            Some(content) => AgentReply::Message {
                content: content.clone(),
            },
            None => AgentReply::Value(serde_json::to_value(message)?),
        };

        Ok(AgentResponse {
            reply,
            tool_calls,
            iterations,
        })
    }
}

/// Reply shapes the agent runtime can produce on its final turn.
#[derive(Debug, Clone)]
pub enum AgentReply {
    /// A message carrying a textual content field.
    Message { content: String },
    /// Any other value the runtime handed back.
    Value(serde_json::Value),
}

impl AgentReply {
    /// Normalize the reply into plain text.
    ///
    /// Messages yield their content verbatim; any other shape is coerced
    /// to its string representation.
    pub fn into_text(self) -> String {
        match self {
            AgentReply::Message { content } => content,
            AgentReply::Value(serde_json::Value::String(s)) => s,
            AgentReply::Value(value) => value.to_string(),
        }
    }
}

/// Response from an agent run.
#[derive(Debug)]
pub struct AgentResponse {
    /// Final reply from the agent, shape-normalized at the boundary.
    pub reply: AgentReply,
    /// Record of all tool calls made during execution.
    pub tool_calls: Vec<ToolCallRecord>,
    /// Number of iterations (LLM calls) used.
    pub iterations: usize,
}

/// Record of a tool call made by the agent.
#[derive(Debug, Clone)]
pub struct ToolCallRecord {
    /// Name of the tool called.
    pub name: String,
    /// JSON arguments passed to the tool.
    pub arguments: String,
    /// Result returned by the tool.
    pub result: String,
}

impl std::fmt::Display for ToolCallRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_reply_yields_content() {
        let reply = AgentReply::Message {
            content: "42".to_string(),
        };
        assert_eq!(reply.into_text(), "42");
    }

    #[test]
    fn test_bare_value_reply_is_stringified() {
        assert_eq!(AgentReply::Value(serde_json::json!(42)).into_text(), "42");
        assert_eq!(AgentReply::Value(serde_json::json!("42")).into_text(), "42");
        assert_eq!(
            AgentReply::Value(serde_json::json!({"answer": 42})).into_text(),
            r#"{"answer":42}"#
        );
    }

    #[test]
    fn test_tool_call_record_display() {
        let record = ToolCallRecord {
            name: "fetch_captions".to_string(),
            arguments: r#"{"video": "dQw4w9WgXcQ"}"#.to_string(),
            result: "Captions".to_string(),
        };
        assert_eq!(
            format!("{}", record),
            r#"fetch_captions({"video": "dQw4w9WgXcQ"})"#
        );
    }
}
