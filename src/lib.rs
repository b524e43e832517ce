//! Svar - Video Q&A
//!
//! A service for fetching YouTube transcripts and asking questions about
//! video content.
//!
//! The name "Svar" comes from the Norwegian/Scandinavian word for "answer."
//!
//! # Overview
//!
//! Svar allows you to:
//! - Resolve a YouTube URL or video ID into its transcript and metadata
//! - Ask natural-language questions about a video's content
//! - Serve both operations over a small HTTP API
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `video_id` - Canonical video identifier parsing
//! - `transcript` - Caption track retrieval
//! - `resolver` - Video metadata assembly
//! - `secrets` - Credential resolution
//! - `agent` - Tool-calling agent bound to the caption capability
//! - `dispatcher` - Question-answering dispatch
//! - `config` - Configuration management
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use svar::resolver::VideoResolver;
//! use svar::transcript::YoutubeTranscriptProvider;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let provider = Arc::new(YoutubeTranscriptProvider::new(vec!["en".to_string()])?);
//!     let resolver = VideoResolver::new(provider);
//!
//!     let metadata = resolver.resolve("dQw4w9WgXcQ").await?;
//!     println!("{}", metadata.transcript);
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod openai;
pub mod resolver;
pub mod secrets;
pub mod transcript;
pub mod video_id;

pub use error::{Result, SvarError};
