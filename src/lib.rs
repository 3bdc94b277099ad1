//! # Intel Brief
//!
//! Turns a seller/buyer profile pair into a sales-intelligence brief.
//!
//! ## Pipeline
//!
//! - **Extraction**: reference URLs from both profiles go to an [`Extractor`]
//!   with a JSON schema; the structured reply is merged field by field into
//!   the profiles. A present field overwrites, an absent one keeps what the
//!   user typed.
//! - **Synthesis**: both profiles are embedded in a fixed twelve-section prompt
//!   and a [`Synthesizer`] returns annotated markdown.
//! - **Rendering**: the markdown is parsed into a block tree and any block
//!   quote carrying `[!KEY_INSIGHT]`, `[!HIDDEN_RISK]` or `[!TACTICAL_EDGE]`
//!   becomes a typed callout. The tree renders to HTML or plain text.
//!
//! [`PipelineController`] sequences the three stages and owns the session
//! state. [`GeminiClient`] implements both capabilities against the Gemini
//! API (feature `gemini`, on by default).
//!
//! ## Example
//!
//! ```rust,ignore
//! use intel_brief::*;
//!
//! let gemini = GeminiClient::from_env()?;
//! let controller = PipelineController::new(gemini.clone(), gemini);
//!
//! controller.update_seller(|s| s.linkedin_url = "linkedin.com/in/sarah".into());
//! controller.update_buyer(|b| b.website = "https://globex.com".into());
//! controller.fetch().await?;
//!
//! controller.analyze().await?;
//! let html = controller.render_report().map(|doc| doc.to_html());
//! ```

pub mod capability;
pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod extraction;
pub mod llm;
pub mod merge;
pub mod profile;
pub mod render;
pub mod synthesis;

pub use capability::{ExtractionRequest, Extractor, Synthesizer};
pub use config::GeminiConfig;
pub use controller::{FetchOutcome, Operation, PipelineController, PipelineFailure, PipelineState};
pub use error::{IntelBriefError, Result};
pub use export::{export_title, ExportDocument};
pub use extraction::{
    normalize_reference_urls, parse_extraction_response, response_schema, ExtractionClient,
    ExtractionResult,
};
#[cfg(feature = "gemini")]
pub use llm::GeminiClient;
pub use merge::{merge_buyer, merge_extraction, merge_seller};
pub use profile::{BuyerPatch, BuyerProfile, SellerPatch, SellerProfile};
pub use render::{AnnotationRenderer, Block, Callout, CalloutKind, Document, Inline};
pub use synthesis::{ReportSynthesizer, SynthesizedReport};

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct CannedExtractor(&'static str);

    #[async_trait]
    impl Extractor for CannedExtractor {
        async fn extract(&self, _request: &ExtractionRequest) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct CannedSynthesizer(&'static str);

    #[async_trait]
    impl Synthesizer for CannedSynthesizer {
        async fn synthesize(&self, _prompt: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    #[tokio::test]
    async fn test_end_to_end_fetch_analyze_render() {
        let controller = PipelineController::new(
            CannedExtractor(
                r#"{"seller":{"name":"Sarah Jenkins","company":"Acme"},"buyer":{"name":"Michael Chen","company":"Globex"}}"#,
            ),
            CannedSynthesizer(
                "## 1. Buyer Snapshot\n\n> [!HIDDEN_RISK] Budget freeze in Q3\n\nPlain closing line.",
            ),
        );
        controller.update_buyer(|b| b.website = "https://globex.com".to_string());

        assert!(controller.can_fetch());
        controller.fetch().await.unwrap();
        assert!(controller.can_analyze());
        controller.analyze().await.unwrap();

        let doc = controller.render_report().unwrap();
        let callouts = doc.callouts();
        assert_eq!(callouts.len(), 1);
        assert_eq!(callouts[0].kind, CalloutKind::HiddenRisk);
        assert_eq!(callouts[0].plain_text(), "Budget freeze in Q3");

        let export = controller.export().unwrap();
        assert!(export.title.ends_with("Michael Chen"));
        assert_eq!(controller.state(), PipelineState::Ready);
    }
}
