use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::capability::{ExtractionRequest, Extractor};
use crate::error::{IntelBriefError, Result};
use crate::llm::prompts::build_extraction_prompt;
use crate::llm::schema::to_gemini_schema;
use crate::profile::{BuyerPatch, SellerPatch};

/// Best-effort enrichment returned by one extraction call.
/// This struct is serialized to JSON Schema and passed to the model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ExtractionResult {
    #[schemars(description = "Fields extracted or inferred for the seller, if any source describes them.")]
    pub seller: Option<SellerPatch>,

    #[schemars(description = "Fields extracted or inferred for the buyer, if any source describes them.")]
    pub buyer: Option<BuyerPatch>,

    #[schemars(description = "Overall confidence in the extracted data.")]
    pub confidence: Option<f64>,
}

impl ExtractionResult {
    /// True when neither half carries a patch.
    pub fn is_empty(&self) -> bool {
        self.seller.is_none() && self.buyer.is_none()
    }
}

/// JSON schema for [`ExtractionResult`], in the form Gemini structured output
/// accepts.
pub fn response_schema() -> Result<Value> {
    let root = schemars::schema_for!(ExtractionResult);
    let value = serde_json::to_value(&root)?;
    Ok(to_gemini_schema(&value))
}

/// Trims entries, drops blanks, and removes duplicates keeping the first
/// occurrence.
pub fn normalize_reference_urls<S: AsRef<str>>(urls: &[S]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(urls.len());
    for url in urls {
        let url = url.as_ref().trim();
        if url.is_empty() || normalized.iter().any(|seen| seen == url) {
            continue;
        }
        normalized.push(url.to_string());
    }
    normalized
}

/// Parses raw model output into an [`ExtractionResult`]. Anything that is not
/// a JSON object matching the schema is an `ExtractionFailure`.
pub fn parse_extraction_response(raw: &str) -> Result<ExtractionResult> {
    let text = strip_json_fences(raw);

    let value: Value = serde_json::from_str(text).map_err(|e| {
        IntelBriefError::ExtractionFailure(format!("response is not valid JSON: {}", e))
    })?;

    if !value.is_object() {
        return Err(IntelBriefError::ExtractionFailure(
            "response is not a JSON object".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|e| {
        IntelBriefError::ExtractionFailure(format!(
            "response does not match the extraction schema: {}",
            e
        ))
    })
}

/// Strips ```json ... ``` or ``` ... ``` fences some models wrap JSON in.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
    else {
        return text;
    };
    let rest = rest.trim_start();
    rest.strip_suffix("```").map(str::trim).unwrap_or(rest)
}

fn into_extraction_failure(err: IntelBriefError) -> IntelBriefError {
    match err {
        IntelBriefError::ExtractionFailure(_) => err,
        other => IntelBriefError::ExtractionFailure(other.to_string()),
    }
}

/// Schema-constrained profile extraction over a set of reference URLs.
pub struct ExtractionClient<E> {
    extractor: E,
}

impl<E: Extractor> ExtractionClient<E> {
    pub fn new(extractor: E) -> Self {
        Self { extractor }
    }

    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    /// Calling with no usable URL is a caller error and never reaches the
    /// extractor.
    pub async fn extract<S: AsRef<str>>(&self, reference_urls: &[S]) -> Result<ExtractionResult> {
        let urls = normalize_reference_urls(reference_urls);
        if urls.is_empty() {
            return Err(IntelBriefError::ValidationGate(
                "extraction needs at least one reference URL".to_string(),
            ));
        }

        info!("Extracting profiles from {} reference URL(s)", urls.len());

        let request = ExtractionRequest {
            prompt: build_extraction_prompt(&urls),
            reference_urls: urls,
            response_schema: response_schema().map_err(into_extraction_failure)?,
        };

        let raw = self
            .extractor
            .extract(&request)
            .await
            .map_err(into_extraction_failure)?;

        debug!("Extraction response: {} bytes", raw.len());

        let result = parse_extraction_response(&raw)?;
        if result.is_empty() {
            warn!("Extraction returned no seller or buyer data");
        }
        Ok(result)
    }
}
