use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::capability::Synthesizer;
use crate::error::{IntelBriefError, Result};
use crate::llm::prompts::build_synthesis_prompt;
use crate::profile::{BuyerProfile, SellerProfile};

/// Raw annotated markdown produced by one analysis run. Never edited after
/// creation; a new run yields a new report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesizedReport {
    markdown: String,
    generated_at: DateTime<Utc>,
}

impl SynthesizedReport {
    pub fn new(markdown: impl Into<String>) -> Self {
        Self {
            markdown: markdown.into(),
            generated_at: Utc::now(),
        }
    }

    pub fn markdown(&self) -> &str {
        &self.markdown
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }
}

pub struct ReportSynthesizer<S> {
    synthesizer: S,
}

impl<S: Synthesizer> ReportSynthesizer<S> {
    pub fn new(synthesizer: S) -> Self {
        Self { synthesizer }
    }

    pub fn synthesizer(&self) -> &S {
        &self.synthesizer
    }

    /// The returned text is passed through untouched; structure is only
    /// interpreted later by the renderer.
    pub async fn synthesize(
        &self,
        seller: &SellerProfile,
        buyer: &BuyerProfile,
    ) -> Result<SynthesizedReport> {
        let prompt = build_synthesis_prompt(seller, buyer);
        info!(
            "Synthesizing intelligence brief for buyer '{}'",
            buyer.display_name()
        );
        debug!("Synthesis prompt: {} chars", prompt.len());

        let markdown = self
            .synthesizer
            .synthesize(&prompt)
            .await
            .map_err(|err| match err {
                IntelBriefError::SynthesisFailure(_) => err,
                other => IntelBriefError::SynthesisFailure(other.to_string()),
            })?;

        debug!("Synthesis returned {} chars", markdown.len());
        Ok(SynthesizedReport::new(markdown))
    }
}
