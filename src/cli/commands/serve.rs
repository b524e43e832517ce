//! HTTP API server for integration with other systems.
//!
//! Provides REST endpoints for resolving video transcripts and asking
//! questions about video content.

use crate::cli::Output;
use crate::config::Settings;
use crate::dispatcher::QuestionDispatcher;
use crate::error::SvarError;
use crate::resolver::VideoResolver;
use crate::secrets::EnvSecretStore;
use crate::transcript::YoutubeTranscriptProvider;
use crate::video_id::VideoId;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Shared application state.
struct AppState {
    resolver: VideoResolver,
    dispatcher: QuestionDispatcher,
}

/// Run the HTTP API server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    let provider = Arc::new(YoutubeTranscriptProvider::new(
        settings.transcript.languages.clone(),
    )?);

    let state = Arc::new(AppState {
        resolver: VideoResolver::new(provider.clone()),
        dispatcher: QuestionDispatcher::new(
            Arc::new(EnvSecretStore),
            provider,
            &settings.agent.model,
            settings.agent.max_iterations,
        ),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/resolve", post(resolve))
        .route("/ask", post(ask))
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Svar API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Resolve", "POST /resolve");
    Output::kv("Ask", "POST /ask");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct ResolveRequest {
    /// YouTube URL or 11-character video ID
    url: String,
}

#[derive(Deserialize)]
struct AskRequest {
    video_id: String,
    question: String,
}

#[derive(Serialize)]
struct AskResponse {
    answer: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Map core failures to HTTP status codes.
fn error_status(error: &SvarError) -> StatusCode {
    match error {
        SvarError::InvalidReference(_) => StatusCode::BAD_REQUEST,
        SvarError::TranscriptUnavailable(_) => StatusCode::NOT_FOUND,
        SvarError::CredentialMissing(_) => StatusCode::SERVICE_UNAVAILABLE,
        SvarError::Agent(_) | SvarError::OpenAI(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(error: SvarError) -> axum::response::Response {
    (
        error_status(&error),
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn resolve(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ResolveRequest>,
) -> impl IntoResponse {
    match state.resolver.resolve(&req.url).await {
        Ok(metadata) => Json(metadata).into_response(),
        Err(e) => error_response(e),
    }
}

async fn ask(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AskRequest>,
) -> impl IntoResponse {
    let video_id = match VideoId::parse(&req.video_id) {
        Ok(id) => id,
        Err(e) => return error_response(e),
    };

    match state.dispatcher.answer(&video_id, &req.question).await {
        Ok(answer) => Json(AskResponse {
            answer: answer.answer,
        })
        .into_response(),
        Err(e) => error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            error_status(&SvarError::InvalidReference("x".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_status(&SvarError::TranscriptUnavailable("x".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_status(&SvarError::CredentialMissing("x".to_string())),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            error_status(&SvarError::Agent("x".to_string())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            error_status(&SvarError::Config("x".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
