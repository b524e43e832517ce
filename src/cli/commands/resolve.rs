//! Resolve command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::resolver::VideoResolver;
use crate::transcript::YoutubeTranscriptProvider;
use anyhow::Result;
use std::sync::Arc;

/// Run the resolve command.
pub async fn run_resolve(input: &str, json: bool, settings: Settings) -> Result<()> {
    let provider = Arc::new(YoutubeTranscriptProvider::new(
        settings.transcript.languages.clone(),
    )?);
    let resolver = VideoResolver::new(provider);

    let spinner = Output::spinner("Fetching transcript...");

    match resolver.resolve(input).await {
        Ok(metadata) => {
            spinner.finish_and_clear();

            if json {
                println!("{}", serde_json::to_string_pretty(&metadata)?);
            } else {
                Output::header(&metadata.title);
                Output::kv("Video ID", metadata.video_id.as_str());
                Output::kv("Thumbnail", &metadata.thumbnail_url);
                println!("\n{}\n", metadata.transcript);
            }
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Failed to resolve video: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
