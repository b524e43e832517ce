//! Agent system for answering questions with tool calling.
//!
//! Provides an LLM agent bound to a caption-fetching capability, so
//! questions are answered from what is actually said in a video.

mod runner;
mod tools;

pub use runner::{Agent, AgentReply, AgentResponse, ToolCallRecord};
pub use tools::{parse_tool_call, tool_definitions, ToolCall, ToolContext};
