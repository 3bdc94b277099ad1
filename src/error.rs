use thiserror::Error;

use crate::controller::Operation;

#[derive(Error, Debug)]
pub enum IntelBriefError {
    #[error("Extraction failed: {0}")]
    ExtractionFailure(String),

    #[error("Synthesis failed: {0}")]
    SynthesisFailure(String),

    #[error("Action unavailable: {0}")]
    ValidationGate(String),

    #[error("{0} already in progress")]
    Busy(Operation),

    #[error("Gemini API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Model returned no text content")]
    EmptyResponse,

    #[error("Configuration error: {0}")]
    Config(String),

    #[cfg(feature = "gemini")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, IntelBriefError>;
