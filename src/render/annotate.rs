use serde::{Deserialize, Serialize};

use super::tree::{flatten_text, map_blocks, Block};
use crate::llm::prompts::{SENTINEL_HIDDEN_RISK, SENTINEL_KEY_INSIGHT, SENTINEL_TACTICAL_EDGE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalloutKind {
    KeyInsight,
    HiddenRisk,
    TacticalEdge,
}

impl CalloutKind {
    /// Detection precedence when more than one token is present.
    pub const PRECEDENCE: [CalloutKind; 3] = [
        CalloutKind::KeyInsight,
        CalloutKind::HiddenRisk,
        CalloutKind::TacticalEdge,
    ];

    pub fn token(self) -> &'static str {
        match self {
            CalloutKind::KeyInsight => SENTINEL_KEY_INSIGHT,
            CalloutKind::HiddenRisk => SENTINEL_HIDDEN_RISK,
            CalloutKind::TacticalEdge => SENTINEL_TACTICAL_EDGE,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CalloutKind::KeyInsight => "Key Insight",
            CalloutKind::HiddenRisk => "Hidden Risk",
            CalloutKind::TacticalEdge => "Tactical Edge",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            CalloutKind::KeyInsight => "callout-key-insight",
            CalloutKind::HiddenRisk => "callout-hidden-risk",
            CalloutKind::TacticalEdge => "callout-tactical-edge",
        }
    }

    /// Case-sensitive substring match; first kind in precedence order wins.
    pub fn detect(text: &str) -> Option<CalloutKind> {
        Self::PRECEDENCE
            .into_iter()
            .find(|kind| text.contains(kind.token()))
    }
}

/// Chooses a callout kind for a block-quote body. Read-only.
pub fn classify(children: &[Block]) -> Option<CalloutKind> {
    CalloutKind::detect(&flatten_text(children))
}

/// Removes `token` from one text leaf. When the leaf opens with the token, the
/// whitespace separating it from the content goes with it.
pub fn strip_token(text: &str, token: &str) -> String {
    if !text.contains(token) {
        return text.to_string();
    }
    let stripped = text.replace(token, "");
    if text.starts_with(token) {
        stripped.trim_start().to_string()
    } else {
        stripped
    }
}

/// Rewrites every sentinel-tagged block-quote, at any depth, into a callout.
pub fn annotate_blocks(blocks: &[Block]) -> Vec<Block> {
    blocks.iter().map(annotate_block).collect()
}

fn annotate_block(block: &Block) -> Block {
    match block {
        Block::BlockQuote(children) => match classify(children) {
            Some(kind) => {
                let token = kind.token();
                let stripped = map_blocks(children, &mut |text: &str| strip_token(text, token));
                Block::Callout {
                    kind,
                    children: annotate_blocks(&stripped),
                }
            }
            None => Block::BlockQuote(annotate_blocks(children)),
        },
        Block::Callout { kind, children } => Block::Callout {
            kind: *kind,
            children: annotate_blocks(children),
        },
        Block::List { start, items } => Block::List {
            start: *start,
            items: items.iter().map(|item| annotate_blocks(item)).collect(),
        },
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tree::Inline;

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    #[test]
    fn test_detect_precedence() {
        assert_eq!(
            CalloutKind::detect("[!TACTICAL_EDGE] and [!HIDDEN_RISK]"),
            Some(CalloutKind::HiddenRisk)
        );
        assert_eq!(
            CalloutKind::detect("[!TACTICAL_EDGE] [!KEY_INSIGHT]"),
            Some(CalloutKind::KeyInsight)
        );
        assert_eq!(CalloutKind::detect("[!key_insight]"), None);
        assert_eq!(CalloutKind::detect("[!KEY INSIGHT]"), None);
    }

    #[test]
    fn test_strip_token() {
        assert_eq!(strip_token("[!KEY_INSIGHT] Lead with ROI", "[!KEY_INSIGHT]"), "Lead with ROI");
        assert_eq!(strip_token("[!KEY_INSIGHT]Lead", "[!KEY_INSIGHT]"), "Lead");
        assert_eq!(
            strip_token("Note: [!KEY_INSIGHT] keep  spacing", "[!KEY_INSIGHT]"),
            "Note:  keep  spacing"
        );
        assert_eq!(strip_token("untouched  text ", "[!KEY_INSIGHT]"), "untouched  text ");
    }

    #[test]
    fn test_callout_keeps_nested_inline_nodes() {
        let quote = Block::BlockQuote(vec![Block::Paragraph(vec![
            text("[!TACTICAL_EDGE] Open with "),
            Inline::Strong(vec![text("their Q2 board memo")]),
            text(", see "),
            Inline::Link {
                dest: "https://globex.example/ir".to_string(),
                title: String::new(),
                content: vec![Inline::Emphasis(vec![text("investor page")])],
            },
        ])]);

        let annotated = annotate_blocks(&[quote]);

        assert_eq!(
            annotated,
            vec![Block::Callout {
                kind: CalloutKind::TacticalEdge,
                children: vec![Block::Paragraph(vec![
                    text("Open with "),
                    Inline::Strong(vec![text("their Q2 board memo")]),
                    text(", see "),
                    Inline::Link {
                        dest: "https://globex.example/ir".to_string(),
                        title: String::new(),
                        content: vec![Inline::Emphasis(vec![text("investor page")])],
                    },
                ])],
            }]
        );
    }

    #[test]
    fn test_token_inside_emphasis_is_stripped_in_place() {
        let quote = Block::BlockQuote(vec![Block::Paragraph(vec![Inline::Strong(vec![text(
            "[!HIDDEN_RISK] Procurement veto",
        )])])]);

        let annotated = annotate_blocks(&[quote]);

        assert_eq!(
            annotated,
            vec![Block::Callout {
                kind: CalloutKind::HiddenRisk,
                children: vec![Block::Paragraph(vec![Inline::Strong(vec![text(
                    "Procurement veto"
                )])])],
            }]
        );
    }

    #[test]
    fn test_untagged_quote_passes_through() {
        let quote = Block::BlockQuote(vec![Block::Paragraph(vec![text("Plain quote")])]);
        assert_eq!(annotate_blocks(&[quote.clone()]), vec![quote]);
    }

    #[test]
    fn test_quotes_inside_lists_are_annotated() {
        let list = Block::List {
            start: Some(1),
            items: vec![vec![Block::BlockQuote(vec![Block::Paragraph(vec![text(
                "[!KEY_INSIGHT] Champion exists",
            )])])]],
        };

        let annotated = annotate_blocks(&[list]);

        assert_eq!(
            annotated,
            vec![Block::List {
                start: Some(1),
                items: vec![vec![Block::Callout {
                    kind: CalloutKind::KeyInsight,
                    children: vec![Block::Paragraph(vec![text("Champion exists")])],
                }]],
            }]
        );
    }

    #[test]
    fn test_token_in_inline_code_is_stripped() {
        let doc = crate::render::AnnotationRenderer::new().render("> `[!KEY_INSIGHT]` Lead with ROI");

        let callouts = doc.callouts();
        assert_eq!(callouts.len(), 1);
        assert_eq!(callouts[0].kind, CalloutKind::KeyInsight);
        assert_eq!(callouts[0].plain_text(), "Lead with ROI");

        let html = doc.to_html();
        assert!(!html.contains("[!KEY_INSIGHT]"), "token leaked: {}", html);
        assert!(!html.contains("<code>"));
        assert!(html.contains("Lead with ROI"));
    }

    #[test]
    fn test_token_in_code_block_is_stripped() {
        let doc = crate::render::AnnotationRenderer::new()
            .render("> ```\n> [!HIDDEN_RISK] legacy contract\n> ```");

        assert_eq!(doc.callouts()[0].kind, CalloutKind::HiddenRisk);
        assert!(!doc.to_html().contains("[!HIDDEN_RISK]"));
        assert!(!doc.to_plain_text().contains("[!HIDDEN_RISK]"));
    }
}
