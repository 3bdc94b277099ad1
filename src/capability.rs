//! Ports for the two generative capabilities the pipeline depends on.
//!
//! The pipeline never talks to an inference backend directly. It hands a
//! prompt to one of these traits and gets raw text back, which keeps the
//! extraction and synthesis logic testable with deterministic fakes. The
//! Gemini adapter in [`crate::llm`] implements both.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Everything an extraction backend needs for one call.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionRequest {
    pub prompt: String,
    /// De-duplicated, non-empty reference URLs. The backend resolves them.
    pub reference_urls: Vec<String>,
    /// JSON schema the response text must conform to.
    pub response_schema: Value,
}

#[async_trait]
pub trait Extractor: Send + Sync {
    /// Returns the raw response text, expected to be JSON matching
    /// `request.response_schema`.
    async fn extract(&self, request: &ExtractionRequest) -> Result<String>;
}

#[async_trait]
pub trait Synthesizer: Send + Sync {
    /// Returns free-form markdown.
    async fn synthesize(&self, prompt: &str) -> Result<String>;
}
