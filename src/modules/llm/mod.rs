//! Text generation
//!
//! A prompt goes in, the full generated text comes out. One synchronous round
//! trip per call: no streaming, no retries.

mod gemini_client;

pub use gemini_client::GeminiClient;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Request to generation API failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Generation API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Prompt was blocked by the generation API: {0}")]
    Blocked(String),

    #[error("Generation API returned no text")]
    EmptyResponse,
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}
