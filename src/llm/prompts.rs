// Prompt contracts for the two generation calls.
//
// The section list and its order are part of the output contract: renumbering
// or dropping a section changes every report produced afterwards.

use crate::profile::{BuyerProfile, SellerProfile};

pub const SENTINEL_KEY_INSIGHT: &str = "[!KEY_INSIGHT]";
pub const SENTINEL_HIDDEN_RISK: &str = "[!HIDDEN_RISK]";
pub const SENTINEL_TACTICAL_EDGE: &str = "[!TACTICAL_EDGE]";

pub const EXTRACTION_SYSTEM_PROMPT: &str = "You are a B2B research analyst. Read the pages behind the \
given URLs and return only the JSON object described by the response schema. Never invent field names.";

pub const SYNTHESIS_SYSTEM_PROMPT: &str = "You are an elite sales strategist. Respond with the requested \
brief in Markdown only, without any preamble.";

/// The twelve report sections, in order, with the brief for each.
pub const REPORT_SECTIONS: [(&str, &str); 12] = [
    (
        "Buyer Snapshot",
        "Leadership archetype, Decision identity, Core motivations, Strategic triggers, Recommended engagement posture. (Highly compressed).",
    ),
    (
        "Deep Psychological Profile",
        "Archetype classification (Empire Builder, Systems Thinker, Visionary Operator, Institutional Guardian, Pragmatic Optimizer).\n- Identity drivers, Ego sensitivities, Cognitive biases, Emotional activation language, Messaging landmines.",
    ),
    (
        "Decision Intelligence",
        "Risk tolerance profile, Evidence standards, Decision speed patterns, Objection psychology, Internal validation style.",
    ),
    (
        "Power & Politics Map",
        "Economic buyer, Political influencers, Technical gatekeepers, Silent blockers, Innovation champions.\n- Influence relationships, Alignment clusters, Friction zones, Access sequencing strategy.",
    ),
    (
        "Strategic Positioning",
        "Category positioning angles, Narrative reframes, Differentiation strategy, Trust bridge construction.",
    ),
    (
        "Competitive Warfare Analysis",
        "Incumbent advantages vs. Hidden weaknesses, Overfit zones, Counter-positioning angles, Battlefield reframing.",
    ),
    (
        "Hidden Pain Analysis",
        "Explicit pains vs. Inferred organizational friction, Cognitive overload zones, Political risks, Transformation pressure.",
    ),
    (
        "Objection Neuroscience",
        "Surface objection vs. Root fear/belief, Identity risk involved, Strategic response framework.",
    ),
    (
        "Deal Execution Blueprint",
        "Entry strategy, Stakeholder sequencing, Credibility unlock moments, Proof strategy, Momentum tactics, Timing windows.",
    ),
    (
        "Non-Obvious Strategic Angles",
        "5 unconventional insights that create asymmetric advantage and reframe the opportunity.",
    ),
    (
        "Win Probability Model",
        "Win likelihood ranges, Key swing factors, Deal-killing risks, Success accelerators. (Use reasoning, not fake precision).",
    ),
    (
        "Precision Outreach",
        "Founder-grade email, High-signal LinkedIn message, 3 authority-creating discovery questions.",
    ),
];

const INTELLIGENCE_STANDARDS: &str = r#"
INTELLIGENCE STANDARDS:
- Write like a fusion of a Top Strategy Consultant, Elite Enterprise Seller, and Behavioral Psychologist.
- No generic fluff. High signal density.
- Prefer inference over repetition. Use intelligent deduction.
- Label inferred insights clearly (e.g., "Inference:", "Likely:").
- Use Markdown for structure.
- Use strategic callout boxes using blockquotes with specific prefixes:
  - > [!KEY_INSIGHT] for critical takeaways.
  - > [!HIDDEN_RISK] for non-obvious threats.
  - > [!TACTICAL_EDGE] for specific advantages.
- Each callout blockquote carries exactly one prefix.
"#;

pub fn build_extraction_prompt(reference_urls: &[String]) -> String {
    format!(
        "Analyze the following URLs and extract structured information for a sales intelligence tool.\n\
        URLs: {}\n\n\
        Extract or infer:\n\
        - For the Seller (if applicable): Name, Role, Company, Website, Industry, LinkedIn URL, Product Focus (ICP, product positioning), Value Proposition (messaging).\n\
        - For the Buyer (if applicable): Name, Job Title, Company, Industry, Website, LinkedIn URL, Pain Points (market position, strategic initiatives).\n\n\
        Return a JSON object with 'seller' and 'buyer' keys containing the extracted fields, \
        plus an optional numeric 'confidence'.\n\
        Omit any field you cannot determine. Only use the field names defined in the schema.\n\
        If a field is inferred, mark it as such in its value.",
        reference_urls.join(", ")
    )
}

pub fn build_synthesis_prompt(seller: &SellerProfile, buyer: &BuyerProfile) -> String {
    let mut prompt = String::from(
        "Generate an ELITE FOUNDER-GRADE SALES INTELLIGENCE BRIEF.\n\
        This is a high-stakes document designed for winning enterprise deals.\n\n",
    );

    prompt.push_str(&format!(
        "SELLER CONTEXT:\n\
        Name: {} | Role: {} | Company: {}\n\
        Industry: {} | Website: {} | LinkedIn: {}\n\
        Product: {} | Value Prop: {}\n\n",
        seller.name,
        seller.job_profile,
        seller.company,
        seller.industry,
        seller.website,
        seller.linkedin_url,
        seller.product_focus,
        seller.value_prop,
    ));

    prompt.push_str(&format!(
        "BUYER CONTEXT:\n\
        Name: {} | Title: {} | Company: {}\n\
        Industry: {} | Website: {} | LinkedIn: {}\n\
        Stated Pain Points: {}\n",
        buyer.name,
        buyer.job_title,
        buyer.company,
        buyer.industry,
        buyer.website,
        buyer.linkedin_url,
        buyer.pain_points,
    ));

    prompt.push_str(INTELLIGENCE_STANDARDS);
    prompt.push_str("\nDOCUMENT STRUCTURE:\n");

    for (idx, (title, brief)) in REPORT_SECTIONS.iter().enumerate() {
        prompt.push_str(&format!(
            "\nSECTION {} — {}\n- {}\n",
            idx + 1,
            title.to_uppercase(),
            brief
        ));
    }

    prompt
}
