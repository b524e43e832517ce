//! Ask command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::dispatcher::QuestionDispatcher;
use crate::secrets::EnvSecretStore;
use crate::transcript::YoutubeTranscriptProvider;
use crate::video_id::VideoId;
use anyhow::Result;
use std::sync::Arc;

/// Run the ask command.
pub async fn run_ask(
    video: &str,
    question: &str,
    model: Option<String>,
    settings: Settings,
) -> Result<()> {
    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::Ask) {
        Output::error(&format!("{}", e));
        Output::info("Run 'svar doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let video_id = VideoId::parse(video)?;
    let model = model.unwrap_or_else(|| settings.agent.model.clone());

    let provider = Arc::new(YoutubeTranscriptProvider::new(
        settings.transcript.languages.clone(),
    )?);
    let dispatcher = QuestionDispatcher::new(
        Arc::new(EnvSecretStore),
        provider,
        &model,
        settings.agent.max_iterations,
    );

    let spinner = Output::spinner("Agent working...");

    match dispatcher.answer(&video_id, question).await {
        Ok(answer) => {
            spinner.finish_and_clear();
            println!("\n{}\n", answer.answer);
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Agent failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
