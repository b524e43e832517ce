//! Video metadata resolution.
//!
//! Normalizes a video reference, fetches its caption track, and assembles a
//! metadata record with the full transcript text.

use crate::error::Result;
use crate::transcript::TranscriptProvider;
use crate::video_id::VideoId;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Metadata record assembled for a resolved video.
///
/// Built fresh per request and never persisted. The title is a placeholder
/// derived from the ID; no title lookup is performed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoMetadata {
    /// Display title derived from the video ID.
    pub title: String,
    /// Thumbnail URL derived from the video ID.
    pub thumbnail_url: String,
    /// Canonical video identifier.
    pub video_id: VideoId,
    /// Full transcript text, caption segments joined with single spaces.
    pub transcript: String,
}

/// Resolves video references into metadata records.
pub struct VideoResolver {
    provider: Arc<dyn TranscriptProvider>,
}

impl VideoResolver {
    /// Create a resolver backed by the given transcript provider.
    pub fn new(provider: Arc<dyn TranscriptProvider>) -> Self {
        Self { provider }
    }

    /// Resolve a video reference (URL or bare ID) into a metadata record.
    ///
    /// Fails when the reference cannot be parsed or the video has no usable
    /// captions. Each call hits the provider exactly once; no caching, no
    /// retries. The record is fully populated or the call fails.
    pub async fn resolve(&self, reference: &str) -> Result<VideoMetadata> {
        let video_id = VideoId::parse(reference)?;

        let segments = self.provider.fetch(&video_id).await.map_err(|e| {
            warn!("Transcript fetch failed for {}: {}", video_id, e);
            e
        })?;

        let transcript = segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        info!(
            "Resolved video {} ({} caption segments)",
            video_id,
            segments.len()
        );

        Ok(VideoMetadata {
            title: format!("YouTube Video {}", video_id),
            thumbnail_url: video_id.thumbnail_url(),
            video_id,
            transcript,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SvarError;
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

    struct UnavailableProvider;

    #[async_trait]
    impl TranscriptProvider for UnavailableProvider {
        async fn fetch(&self, video_id: &VideoId) -> Result<Vec<CaptionSegment>> {
            Err(SvarError::TranscriptUnavailable(video_id.to_string()))
        }
    }

    fn segment(text: &str) -> CaptionSegment {
        CaptionSegment {
            text: text.to_string(),
            start: 0.0,
            duration: 1.0,
        }
    }

    #[tokio::test]
    async fn test_resolve_assembles_metadata() {
        let resolver = VideoResolver::new(Arc::new(FakeProvider {
            segments: vec![segment("Hello"), segment("world")],
        }));

        let metadata = resolver.resolve("abc12345678").await.unwrap();

        assert_eq!(metadata.transcript, "Hello world");
        assert_eq!(metadata.video_id.as_str(), "abc12345678");
        assert_eq!(metadata.title, "YouTube Video abc12345678");
        assert_eq!(
            metadata.thumbnail_url,
            "https://img.youtube.com/vi/abc12345678/maxresdefault.jpg"
        );
    }

    #[tokio::test]
    async fn test_resolve_accepts_urls() {
        let resolver = VideoResolver::new(Arc::new(FakeProvider {
            segments: vec![segment("hi")],
        }));

        let metadata = resolver
            .resolve("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
            .await
            .unwrap();
        assert_eq!(metadata.video_id.as_str(), "dQw4w9WgXcQ");
    }

    #[tokio::test]
    async fn test_resolve_invalid_reference() {
        let resolver = VideoResolver::new(Arc::new(FakeProvider { segments: vec![] }));

        let err = resolver.resolve("not a url").await.unwrap_err();
        assert!(matches!(err, SvarError::InvalidReference(_)));
    }

    #[tokio::test]
    async fn test_resolve_propagates_transcript_failure() {
        let resolver = VideoResolver::new(Arc::new(UnavailableProvider));

        let err = resolver.resolve("abc12345678").await.unwrap_err();
        assert!(matches!(err, SvarError::TranscriptUnavailable(_)));
    }

    #[tokio::test]
    async fn test_resolve_is_deterministic() {
        let resolver = VideoResolver::new(Arc::new(FakeProvider {
            segments: vec![segment("Hello"), segment("world")],
        }));

        let first = resolver.resolve("https://youtu.be/abc12345678").await.unwrap();
        let second = resolver.resolve("https://youtu.be/abc12345678").await.unwrap();
        assert_eq!(first, second);
    }
}
