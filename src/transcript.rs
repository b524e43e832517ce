//! Caption track retrieval.
//!
//! The production provider fetches caption tracks from YouTube's transcript
//! endpoints. The trait seam keeps the resolver and the agent's caption
//! capability testable without network access.

use crate::error::{Result, SvarError};
use crate::video_id::VideoId;
use async_trait::async_trait;
use tracing::debug;
use yt_transcript_rs::api::YouTubeTranscriptApi;

/// A single caption segment, in playback order.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionSegment {
    /// Caption text.
    pub text: String,
    /// Start offset in seconds.
    pub start: f64,
    /// Display duration in seconds.
    pub duration: f64,
}

/// Source of caption tracks for a video.
#[async_trait]
pub trait TranscriptProvider: Send + Sync {
    /// Fetch the caption track for a video, preserving provider order.
    ///
    /// Fails with [`SvarError::TranscriptUnavailable`] when the video has
    /// no usable captions or the provider rejects the identifier.
    async fn fetch(&self, video_id: &VideoId) -> Result<Vec<CaptionSegment>>;
}

/// Caption provider backed by YouTube's transcript endpoints.
pub struct YoutubeTranscriptProvider {
    api: YouTubeTranscriptApi,
    languages: Vec<String>,
}

impl YoutubeTranscriptProvider {
    /// Create a provider with a language preference list (e.g. `["en"]`).
    pub fn new(languages: Vec<String>) -> Result<Self> {
        let api = YouTubeTranscriptApi::new(None, None, None).map_err(|e| {
            SvarError::Config(format!("Failed to create transcript client: {}", e))
        })?;

        Ok(Self { api, languages })
    }
}

#[async_trait]
impl TranscriptProvider for YoutubeTranscriptProvider {
    async fn fetch(&self, video_id: &VideoId) -> Result<Vec<CaptionSegment>> {
        let languages: Vec<&str> = self.languages.iter().map(String::as_str).collect();

        debug!("Fetching caption track for video {}", video_id);

        let transcript = self
            .api
            .fetch_transcript(video_id.as_str(), &languages, false)
            .await
            .map_err(|e| SvarError::TranscriptUnavailable(format!("{}: {}", video_id, e)))?;

        Ok(transcript
            .snippets
            .into_iter()
            .map(|s| CaptionSegment {
                text: s.text,
                start: s.start,
                duration: s.duration,
            })
            .collect())
    }
}
