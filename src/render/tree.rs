use super::annotate::CalloutKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    None,
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Vec<Inline>),
    /// Inline content that is not wrapped in a paragraph, as in tight list
    /// items.
    Plain(Vec<Inline>),
    Heading {
        level: u8,
        content: Vec<Inline>,
    },
    BlockQuote(Vec<Block>),
    Callout {
        kind: CalloutKind,
        children: Vec<Block>,
    },
    List {
        start: Option<u64>,
        items: Vec<Vec<Block>>,
    },
    CodeBlock {
        info: String,
        literal: String,
    },
    Html(String),
    Table {
        alignments: Vec<Alignment>,
        head: Vec<Vec<Inline>>,
        rows: Vec<Vec<Vec<Inline>>>,
    },
    Rule,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Code(String),
    Emphasis(Vec<Inline>),
    Strong(Vec<Inline>),
    Strikethrough(Vec<Inline>),
    Link {
        dest: String,
        title: String,
        content: Vec<Inline>,
    },
    Image {
        dest: String,
        title: String,
        alt: Vec<Inline>,
    },
    Html(String),
    SoftBreak,
    HardBreak,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Block {
    /// Rebuilds the block with `f` applied to every text-bearing leaf: text,
    /// inline code, raw HTML and code block bodies. Structure is cloned as-is.
    pub fn map_text<F: FnMut(&str) -> String>(&self, f: &mut F) -> Block {
        match self {
            Block::Paragraph(content) => Block::Paragraph(map_inlines(content, f)),
            Block::Plain(content) => Block::Plain(map_inlines(content, f)),
            Block::Heading { level, content } => Block::Heading {
                level: *level,
                content: map_inlines(content, f),
            },
            Block::BlockQuote(children) => Block::BlockQuote(map_blocks(children, f)),
            Block::Callout { kind, children } => Block::Callout {
                kind: *kind,
                children: map_blocks(children, f),
            },
            Block::List { start, items } => Block::List {
                start: *start,
                items: items.iter().map(|item| map_blocks(item, f)).collect(),
            },
            Block::Table {
                alignments,
                head,
                rows,
            } => Block::Table {
                alignments: alignments.clone(),
                head: head.iter().map(|cell| map_inlines(cell, f)).collect(),
                rows: rows
                    .iter()
                    .map(|row| row.iter().map(|cell| map_inlines(cell, f)).collect())
                    .collect(),
            },
            Block::CodeBlock { info, literal } => Block::CodeBlock {
                info: info.clone(),
                literal: f(literal.as_str()),
            },
            Block::Html(html) => Block::Html(f(html.as_str())),
            Block::Rule => Block::Rule,
        }
    }
}

impl Inline {
    pub fn map_text<F: FnMut(&str) -> String>(&self, f: &mut F) -> Inline {
        match self {
            Inline::Text(text) => Inline::Text(f(text.as_str())),
            Inline::Code(code) => Inline::Code(f(code.as_str())),
            Inline::Html(html) => Inline::Html(f(html.as_str())),
            Inline::Emphasis(children) => Inline::Emphasis(map_inlines(children, f)),
            Inline::Strong(children) => Inline::Strong(map_inlines(children, f)),
            Inline::Strikethrough(children) => Inline::Strikethrough(map_inlines(children, f)),
            Inline::Link {
                dest,
                title,
                content,
            } => Inline::Link {
                dest: dest.clone(),
                title: title.clone(),
                content: map_inlines(content, f),
            },
            Inline::Image { dest, title, alt } => Inline::Image {
                dest: dest.clone(),
                title: title.clone(),
                alt: map_inlines(alt, f),
            },
            Inline::SoftBreak | Inline::HardBreak => self.clone(),
        }
    }
}

pub fn map_blocks<F: FnMut(&str) -> String>(blocks: &[Block], f: &mut F) -> Vec<Block> {
    blocks.iter().map(|block| block.map_text(f)).collect()
}

pub fn map_inlines<F: FnMut(&str) -> String>(inlines: &[Inline], f: &mut F) -> Vec<Inline> {
    inlines.iter().map(|inline| inline.map_text(f)).collect()
}

pub fn collect_inline_text(inlines: &[Inline], out: &mut String) {
    for inline in inlines {
        match inline {
            Inline::Text(text) | Inline::Code(text) | Inline::Html(text) => out.push_str(text),
            Inline::Emphasis(children)
            | Inline::Strong(children)
            | Inline::Strikethrough(children)
            | Inline::Link {
                content: children, ..
            }
            | Inline::Image { alt: children, .. } => collect_inline_text(children, out),
            Inline::SoftBreak | Inline::HardBreak => out.push(' '),
        }
    }
}

/// Concatenated text of exactly the leaves [`Block::map_text`] visits, so
/// anything found here can also be rewritten there. Used for classification.
pub fn flatten_text(blocks: &[Block]) -> String {
    let mut out = String::new();
    map_blocks(blocks, &mut |text: &str| {
        out.push_str(text);
        text.to_string()
    });
    out
}
