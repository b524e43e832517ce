//! Question-answering dispatch.
//!
//! Routes a question about a video to a single-use agent and normalizes
//! the agent's reply into a plain-text answer.

use crate::agent::{Agent, ToolContext};
use crate::error::{Result, SvarError};
use crate::secrets::{SecretStore, OPENAI_API_KEY};
use crate::transcript::TranscriptProvider;
use crate::video_id::VideoId;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};

/// Plain-text answer to a question about a video.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    pub answer: String,
}

/// Dispatches questions about a video to a single-use agent.
pub struct QuestionDispatcher {
    secrets: Arc<dyn SecretStore>,
    provider: Arc<dyn TranscriptProvider>,
    model: String,
    max_iterations: usize,
}

impl QuestionDispatcher {
    /// Create a dispatcher with its collaborators and agent settings.
    pub fn new(
        secrets: Arc<dyn SecretStore>,
        provider: Arc<dyn TranscriptProvider>,
        model: &str,
        max_iterations: usize,
    ) -> Self {
        Self {
            secrets,
            provider,
            model: model.to_string(),
            max_iterations,
        }
    }

    /// Answer a question about a video.
    ///
    /// The API credential is resolved first; when it is absent the call
    /// fails before any agent construction. Each call builds a fresh agent
    /// bound to the caption-fetching capability, invokes it once with the
    /// question and the video's watch URL, and normalizes the reply.
    pub async fn answer(&self, video_id: &VideoId, question: &str) -> Result<Answer> {
        let api_key = self.secrets.get(OPENAI_API_KEY).ok_or_else(|| {
            error!("Secret {} is not configured", OPENAI_API_KEY);
            SvarError::CredentialMissing(OPENAI_API_KEY.to_string())
        })?;

        let prompt = build_prompt(video_id, question);

        let tools = ToolContext::new(self.provider.clone());
        let agent =
            Agent::new(&api_key, tools, &self.model).with_max_iterations(self.max_iterations);

        let response = agent.run(&prompt).await?;

        info!(
            "Answered question about {} in {} iteration(s), {} tool call(s)",
            video_id,
            response.iterations,
            response.tool_calls.len()
        );

        Ok(Answer {
            answer: response.reply.into_text(),
        })
    }
}

/// Build the agent prompt: the question followed by the watch URL.
fn build_prompt(video_id: &VideoId, question: &str) -> String {
    format!("{}\nVideo: {}", question, video_id.watch_url())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::CaptionSegment;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MapSecretStore(HashMap<String, String>);

    impl SecretStore for MapSecretStore {
        fn get(&self, name: &str) -> Option<String> {
            self.0.get(name).cloned()
        }
    }

    /// Provider that counts fetches, to observe agent side effects.
    struct CountingProvider {
        fetches: AtomicUsize,
    }

    #[async_trait]
    impl TranscriptProvider for CountingProvider {
        async fn fetch(&self, _video_id: &VideoId) -> Result<Vec<CaptionSegment>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(vec![])
        }
    }

    #[test]
    fn test_build_prompt() {
        let video_id = VideoId::parse("abc12345678").unwrap();
        assert_eq!(
            build_prompt(&video_id, "What is this video about?"),
            "What is this video about?\nVideo: https://www.youtube.com/watch?v=abc12345678"
        );
    }

    #[tokio::test]
    async fn test_missing_credential_fails_before_agent_work() {
        let provider = Arc::new(CountingProvider {
            fetches: AtomicUsize::new(0),
        });
        let dispatcher = QuestionDispatcher::new(
            Arc::new(MapSecretStore(HashMap::new())),
            provider.clone(),
            "gpt-4o-mini",
            10,
        );

        let video_id = VideoId::parse("abc12345678").unwrap();
        let err = dispatcher.answer(&video_id, "Why?").await.unwrap_err();

        assert!(matches!(err, SvarError::CredentialMissing(_)));
        assert_eq!(provider.fetches.load(Ordering::SeqCst), 0);
    }
}
