//! Folds extraction patches into the current profile pair.
//!
//! Every field a patch supplies replaces the current value, including a
//! user-entered value and including an explicit empty string. Fields the patch
//! does not supply are left as they are.

use log::debug;

use crate::extraction::ExtractionResult;
use crate::profile::{BuyerPatch, BuyerProfile, SellerPatch, SellerProfile};

fn overwrite(target: &mut String, value: &Option<String>) {
    if let Some(value) = value {
        target.clone_from(value);
    }
}

pub fn merge_seller(current: &SellerProfile, patch: Option<&SellerPatch>) -> SellerProfile {
    let mut merged = current.clone();
    let Some(patch) = patch else {
        return merged;
    };

    overwrite(&mut merged.name, &patch.name);
    overwrite(&mut merged.job_profile, &patch.job_profile);
    overwrite(&mut merged.company, &patch.company);
    overwrite(&mut merged.website, &patch.website);
    overwrite(&mut merged.industry, &patch.industry);
    overwrite(&mut merged.linkedin_url, &patch.linkedin_url);
    overwrite(&mut merged.product_focus, &patch.product_focus);
    overwrite(&mut merged.value_prop, &patch.value_prop);

    merged
}

pub fn merge_buyer(current: &BuyerProfile, patch: Option<&BuyerPatch>) -> BuyerProfile {
    let mut merged = current.clone();
    let Some(patch) = patch else {
        return merged;
    };

    overwrite(&mut merged.name, &patch.name);
    overwrite(&mut merged.job_title, &patch.job_title);
    overwrite(&mut merged.company, &patch.company);
    overwrite(&mut merged.industry, &patch.industry);
    overwrite(&mut merged.pain_points, &patch.pain_points);
    overwrite(&mut merged.linkedin_url, &patch.linkedin_url);
    overwrite(&mut merged.website, &patch.website);

    merged
}

/// Applies both halves of an extraction result. A half that is missing from
/// the result leaves that party's record unchanged.
pub fn merge_extraction(
    seller: &SellerProfile,
    buyer: &BuyerProfile,
    result: &ExtractionResult,
) -> (SellerProfile, BuyerProfile) {
    debug!(
        "Merging extraction result (seller patch: {}, buyer patch: {})",
        result.seller.is_some(),
        result.buyer.is_some()
    );

    (
        merge_seller(seller, result.seller.as_ref()),
        merge_buyer(buyer, result.buyer.as_ref()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sarah() -> SellerProfile {
        SellerProfile {
            name: "Sarah".to_string(),
            industry: "Legacy".to_string(),
            company: "Acme".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_patch_field_overwrites_and_absent_fields_survive() {
        let patch = SellerPatch {
            industry: Some("SaaS".to_string()),
            ..Default::default()
        };

        let merged = merge_seller(&sarah(), Some(&patch));

        assert_eq!(merged.industry, "SaaS");
        assert_eq!(merged.name, "Sarah");
        assert_eq!(merged.company, "Acme");
    }

    #[test]
    fn test_explicit_empty_value_overwrites_user_entry() {
        let patch = SellerPatch {
            company: Some(String::new()),
            ..Default::default()
        };

        let merged = merge_seller(&sarah(), Some(&patch));

        assert_eq!(merged.company, "");
        assert_eq!(merged.name, "Sarah");
    }

    #[test]
    fn test_missing_patch_returns_record_unchanged() {
        let buyer = BuyerProfile {
            name: "Michael Chen".to_string(),
            pain_points: "Churn".to_string(),
            ..Default::default()
        };

        assert_eq!(merge_buyer(&buyer, None), buyer);
    }

    #[test]
    fn test_every_buyer_field_is_mergeable() {
        let patch = BuyerPatch {
            name: Some("n".to_string()),
            job_title: Some("t".to_string()),
            company: Some("c".to_string()),
            industry: Some("i".to_string()),
            pain_points: Some("p".to_string()),
            linkedin_url: Some("l".to_string()),
            website: Some("w".to_string()),
        };

        let merged = merge_buyer(&BuyerProfile::default(), Some(&patch));

        assert_eq!(
            merged,
            BuyerProfile {
                name: "n".to_string(),
                job_title: "t".to_string(),
                company: "c".to_string(),
                industry: "i".to_string(),
                pain_points: "p".to_string(),
                linkedin_url: "l".to_string(),
                website: "w".to_string(),
            }
        );
    }

    #[test]
    fn test_merge_extraction_only_touches_supplied_half() {
        let buyer = BuyerProfile {
            name: "Michael".to_string(),
            ..Default::default()
        };
        let result = ExtractionResult {
            seller: Some(SellerPatch {
                industry: Some("SaaS".to_string()),
                ..Default::default()
            }),
            buyer: None,
            confidence: Some(0.4),
        };

        let (seller, merged_buyer) = merge_extraction(&sarah(), &buyer, &result);

        assert_eq!(seller.industry, "SaaS");
        assert_eq!(merged_buyer, buyer);
    }
}
