//! Turns synthesized markdown into a renderable tree with typed callouts.
//!
//! Rendering is a pure function of the input text: the same report always
//! yields the same tree.

pub mod annotate;
pub mod html;
pub mod parse;
pub mod text;
pub mod tree;

pub use annotate::{annotate_blocks, classify, strip_token, CalloutKind};
pub use parse::parse_markdown;
pub use tree::{flatten_text, Alignment, Block, Document, Inline};

use log::debug;

use crate::synthesis::SynthesizedReport;

/// A callout found in a rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Callout<'a> {
    pub kind: CalloutKind,
    pub children: &'a [Block],
}

impl Callout<'_> {
    pub fn label(&self) -> &'static str {
        self.kind.label()
    }

    pub fn plain_text(&self) -> String {
        Document {
            blocks: self.children.to_vec(),
        }
        .to_plain_text()
    }
}

impl Document {
    /// Callouts in document order, including ones nested in lists or quotes.
    pub fn callouts(&self) -> Vec<Callout<'_>> {
        let mut found = Vec::new();
        collect_callouts(&self.blocks, &mut found);
        found
    }
}

fn collect_callouts<'a>(blocks: &'a [Block], found: &mut Vec<Callout<'a>>) {
    for block in blocks {
        match block {
            Block::Callout { kind, children } => {
                found.push(Callout {
                    kind: *kind,
                    children,
                });
                collect_callouts(children, found);
            }
            Block::BlockQuote(children) => collect_callouts(children, found),
            Block::List { items, .. } => {
                for item in items {
                    collect_callouts(item, found);
                }
            }
            _ => {}
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AnnotationRenderer;

impl AnnotationRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, markdown: &str) -> Document {
        let parsed = parse_markdown(markdown);
        let document = Document {
            blocks: annotate_blocks(&parsed.blocks),
        };
        debug!(
            "Rendered {} top-level blocks, {} callouts",
            document.blocks.len(),
            document.callouts().len()
        );
        document
    }

    pub fn render_report(&self, report: &SynthesizedReport) -> Document {
        self.render(report.markdown())
    }
}
