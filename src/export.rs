use serde::{Deserialize, Serialize};

use crate::profile::BuyerProfile;
use crate::render::Document;

pub const TITLE_PREFIX: &str = "Comprehensive Sales Intelligence Report";

/// What a document exporter needs: a title and the report as plain text.
/// Pagination and layout belong to the exporter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub title: String,
    pub body: String,
    /// Suggested file name for a PDF rendition.
    pub file_name: String,
}

impl ExportDocument {
    pub fn new(buyer: &BuyerProfile, document: &Document) -> Self {
        let title = export_title(buyer);
        let file_name = format!(
            "{}.pdf",
            title.split_whitespace().collect::<Vec<_>>().join("_")
        );
        Self {
            title,
            body: document.to_plain_text(),
            file_name,
        }
    }
}

pub fn export_title(buyer: &BuyerProfile) -> String {
    format!("{} — {}", TITLE_PREFIX, buyer.display_name())
}
