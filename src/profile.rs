use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The seller side of a profile pair. Every field is always present; an unknown
/// value is the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SellerProfile {
    pub name: String,
    pub job_profile: String,
    pub company: String,
    pub website: String,
    pub industry: String,
    pub linkedin_url: String,
    pub product_focus: String,
    pub value_prop: String,
}

/// The buyer side of a profile pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuyerProfile {
    pub name: String,
    pub job_title: String,
    pub company: String,
    pub industry: String,
    pub pain_points: String,
    pub linkedin_url: String,
    pub website: String,
}

impl SellerProfile {
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// LinkedIn first, then website; blank entries are skipped.
    pub fn reference_urls(&self) -> Vec<String> {
        non_blank([&self.linkedin_url, &self.website])
    }
}

impl BuyerProfile {
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    pub fn reference_urls(&self) -> Vec<String> {
        non_blank([&self.linkedin_url, &self.website])
    }

    /// Name used in report titles: the buyer's name, then company, then a
    /// generic placeholder.
    pub fn display_name(&self) -> &str {
        [&self.name, &self.company]
            .into_iter()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .unwrap_or("Client")
    }
}

fn non_blank<const N: usize>(values: [&String; N]) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

/// Partial seller record returned by extraction. `Some` means the extraction
/// supplied the field (even when empty); `None` means it did not address it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SellerPatch {
    #[schemars(description = "Full name of the seller.")]
    pub name: Option<String>,

    #[schemars(description = "The seller's role or job profile (e.g. Senior Account Executive).")]
    pub job_profile: Option<String>,

    #[schemars(description = "Company the seller works for.")]
    pub company: Option<String>,

    #[schemars(description = "Canonical website of the seller's company.")]
    pub website: Option<String>,

    #[schemars(description = "Industry the seller's company operates in.")]
    pub industry: Option<String>,

    #[schemars(description = "LinkedIn profile URL of the seller.")]
    pub linkedin_url: Option<String>,

    #[schemars(description = "What the seller sells: product lines, ICP, positioning.")]
    pub product_focus: Option<String>,

    #[schemars(description = "The seller's core value proposition and messaging.")]
    pub value_prop: Option<String>,
}

/// Partial buyer record returned by extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BuyerPatch {
    #[schemars(description = "Full name of the buyer.")]
    pub name: Option<String>,

    #[schemars(description = "The buyer's job title.")]
    pub job_title: Option<String>,

    #[schemars(description = "Company the buyer works for.")]
    pub company: Option<String>,

    #[schemars(description = "Industry the buyer's company operates in.")]
    pub industry: Option<String>,

    #[schemars(
        description = "Stated or inferred pain points, market position and strategic initiatives of the buyer."
    )]
    pub pain_points: Option<String>,

    #[schemars(description = "LinkedIn profile URL of the buyer.")]
    pub linkedin_url: Option<String>,

    #[schemars(description = "Canonical website of the buyer's company.")]
    pub website: Option<String>,
}

impl SellerPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl BuyerPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
