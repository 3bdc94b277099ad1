use async_trait::async_trait;
use log::{debug, error, info};
use reqwest::Client;

use crate::capability::{ExtractionRequest, Extractor, Synthesizer};
use crate::config::GeminiConfig;
use crate::error::{IntelBriefError, Result};
use crate::llm::prompts::{EXTRACTION_SYSTEM_PROMPT, SYNTHESIS_SYSTEM_PROMPT};
use crate::llm::types::*;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini `generateContent` client. Implements both pipeline capabilities,
/// with URL context enabled so the model can read the reference pages.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(GeminiConfig::from_env()?)
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    pub(crate) async fn generate_content(
        &self,
        system_prompt: &str,
        prompt: &str,
        response_mime_type: &str,
        response_schema: Option<serde_json::Value>,
    ) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        );

        let payload = GenerateContentRequest {
            contents: vec![Content::user(prompt)],
            system_instruction: Some(Content::system(system_prompt)),
            tools: vec![Tool::url_context()],
            generation_config: GenerationConfig {
                response_mime_type: response_mime_type.to_string(),
                response_schema,
            },
        };

        debug!("POST {} ({})", url, response_mime_type);

        let res = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;
        let status = res.status();

        if !status.is_success() {
            let err_text = res.text().await.map_err(|e| self.request_error(e))?;
            let message = serde_json::from_str::<ErrorEnvelope>(&err_text)
                .map(|envelope| envelope.error.message)
                .unwrap_or(err_text);
            error!("Gemini API error (status {}): {}", status, message);
            return Err(IntelBriefError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse =
            res.json().await.map_err(|e| self.request_error(e))?;

        if let Some(reason) = body
            .candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref())
        {
            debug!("Finish reason: {}", reason);
        }

        body.text().ok_or(IntelBriefError::EmptyResponse)
    }

    fn request_error(&self, err: reqwest::Error) -> IntelBriefError {
        if err.is_timeout() {
            IntelBriefError::Timeout(format!(
                "no response from {} within {}s",
                self.config.model,
                self.config.timeout.as_secs()
            ))
        } else {
            IntelBriefError::Http(err.without_url())
        }
    }
}

#[async_trait]
impl Extractor for GeminiClient {
    async fn extract(&self, request: &ExtractionRequest) -> Result<String> {
        info!(
            "Gemini extraction over {} URL(s) with {}",
            request.reference_urls.len(),
            self.config.model
        );
        self.generate_content(
            EXTRACTION_SYSTEM_PROMPT,
            &request.prompt,
            "application/json",
            Some(request.response_schema.clone()),
        )
        .await
    }
}

#[async_trait]
impl Synthesizer for GeminiClient {
    async fn synthesize(&self, prompt: &str) -> Result<String> {
        info!("Gemini synthesis with {}", self.config.model);
        self.generate_content(SYNTHESIS_SYSTEM_PROMPT, prompt, "text/plain", None)
            .await
    }
}
