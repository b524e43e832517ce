//! Tool definitions and implementations for the agent system.

use crate::error::{Result, SvarError};
use crate::transcript::TranscriptProvider;
use crate::video_id::VideoId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Available tools for the agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum ToolCall {
    /// Fetch the caption track of a video.
    FetchCaptions { video: String },
}

/// Tool execution context with access to the transcript provider.
pub struct ToolContext {
    provider: Arc<dyn TranscriptProvider>,
}

impl ToolContext {
    /// Create a new tool context.
    pub fn new(provider: Arc<dyn TranscriptProvider>) -> Self {
        Self { provider }
    }

    /// Execute a tool call and return the result as a string.
    pub async fn execute(&self, tool: &ToolCall) -> Result<String> {
        match tool {
            ToolCall::FetchCaptions { video } => self.execute_fetch_captions(video).await,
        }
    }

    async fn execute_fetch_captions(&self, video: &str) -> Result<String> {
        let video_id = VideoId::parse(video)?;
        let segments = self.provider.fetch(&video_id).await?;

        if segments.is_empty() {
            return Ok(format!("No captions available for video {}.", video_id));
        }

        let text = segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        Ok(format!("Captions for video {}:\n\n{}", video_id, text))
    }
}

/// Get OpenAI function/tool definitions for the agent.
pub fn tool_definitions() -> Vec<async_openai::types::ChatCompletionTool> {
    use async_openai::types::{ChatCompletionTool, ChatCompletionToolType, FunctionObject};

    vec![ChatCompletionTool {
        r#type: ChatCompletionToolType::Function,
        function: FunctionObject {
            name: "fetch_captions".to_string(),
            description: Some(
                "Fetch the full caption track of a YouTube video. \
                Use this to read what is said in the video before answering."
                    .to_string(),
            ),
            parameters: Some(serde_json::json!({
                "type": "object",
                "properties": {
                    "video": {
                        "type": "string",
                        "description": "The video URL or 11-character video ID"
                    }
                },
                "required": ["video"]
            })),
            strict: None,
        },
    }]
}

/// Parse a tool call from the OpenAI response format.
pub fn parse_tool_call(name: &str, arguments: &str) -> Result<ToolCall> {
    let args: serde_json::Value = serde_json::from_str(arguments)
        .map_err(|e| SvarError::Agent(format!("Invalid tool arguments: {}", e)))?;

    match name {
        "fetch_captions" => {
            let video = args["video"]
                .as_str()
                .ok_or_else(|| SvarError::Agent("Missing 'video' argument".to_string()))?
                .to_string();
            Ok(ToolCall::FetchCaptions { video })
        }
        _ => Err(SvarError::Agent(format!("Unknown tool: {}", name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::CaptionSegment;
    use async_trait::async_trait;

    struct FakeProvider {
        segments: Vec<CaptionSegment>,
    }

    #[async_trait]
    impl TranscriptProvider for FakeProvider {
        async fn fetch(&self, _video_id: &VideoId) -> Result<Vec<CaptionSegment>> {
            Ok(self.segments.clone())
        }
    }

    #[test]
    fn test_parse_fetch_captions_tool() {
        let tool = parse_tool_call("fetch_captions", r#"{"video": "dQw4w9WgXcQ"}"#).unwrap();
        match tool {
            ToolCall::FetchCaptions { video } => assert_eq!(video, "dQw4w9WgXcQ"),
        }
    }

    #[test]
    fn test_parse_unknown_tool() {
        assert!(parse_tool_call("download_video", "{}").is_err());
    }

    #[test]
    fn test_parse_missing_argument() {
        assert!(parse_tool_call("fetch_captions", "{}").is_err());
    }

    #[tokio::test]
    async fn test_execute_fetch_captions_joins_text() {
        let context = ToolContext::new(Arc::new(FakeProvider {
            segments: vec![
                CaptionSegment {
                    text: "Hello".to_string(),
                    start: 0.0,
                    duration: 1.0,
                },
                CaptionSegment {
                    text: "world".to_string(),
                    start: 1.0,
                    duration: 1.0,
                },
            ],
        }));

        let result = context
            .execute(&ToolCall::FetchCaptions {
                video: "dQw4w9WgXcQ".to_string(),
            })
            .await
            .unwrap();

        assert!(result.contains("Hello world"));
    }

    #[tokio::test]
    async fn test_execute_fetch_captions_empty_track() {
        let context = ToolContext::new(Arc::new(FakeProvider { segments: vec![] }));

        let result = context
            .execute(&ToolCall::FetchCaptions {
                video: "dQw4w9WgXcQ".to_string(),
            })
            .await
            .unwrap();

        assert!(result.contains("No captions available"));
    }

    #[tokio::test]
    async fn test_execute_rejects_invalid_reference() {
        let context = ToolContext::new(Arc::new(FakeProvider { segments: vec![] }));

        let err = context
            .execute(&ToolCall::FetchCaptions {
                video: "not a video".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, SvarError::InvalidReference(_)));
    }
}
