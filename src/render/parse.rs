use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag};

use super::tree::{Alignment, Block, Document, Inline};

enum Open {
    Root,
    Paragraph,
    Heading(u8),
    BlockQuote,
    List(Option<u64>),
    Item,
    CodeBlock(String),
    HtmlBlock,
    Table(Vec<Alignment>),
    TableHead,
    TableRow,
    TableCell,
    Emphasis,
    Strong,
    Strikethrough,
    Link { dest: String, title: String },
    Image { dest: String, title: String },
    /// Constructs we do not model; children are spliced into the parent.
    Transparent,
}

struct Frame {
    open: Open,
    blocks: Vec<Block>,
    inlines: Vec<Inline>,
    items: Vec<Vec<Block>>,
    cells: Vec<Vec<Inline>>,
    head: Vec<Vec<Inline>>,
    rows: Vec<Vec<Vec<Inline>>>,
    literal: String,
}

impl Frame {
    fn new(open: Open) -> Self {
        Self {
            open,
            blocks: Vec::new(),
            inlines: Vec::new(),
            items: Vec::new(),
            cells: Vec::new(),
            head: Vec::new(),
            rows: Vec::new(),
            literal: String::new(),
        }
    }

    fn collects_literal(&self) -> bool {
        matches!(self.open, Open::CodeBlock(_) | Open::HtmlBlock)
    }

    /// Moves any loose inline run into a `Plain` block.
    fn flush_inlines(&mut self) {
        if !self.inlines.is_empty() {
            let run = std::mem::take(&mut self.inlines);
            self.blocks.push(Block::Plain(run));
        }
    }

    fn push_block(&mut self, block: Block) {
        self.flush_inlines();
        self.blocks.push(block);
    }

    /// Adjacent text events are merged into one leaf so a token is never
    /// split by the parser's bracket and delimiter handling.
    fn push_text(&mut self, text: &str) {
        if let Some(Inline::Text(last)) = self.inlines.last_mut() {
            last.push_str(text);
        } else {
            self.inlines.push(Inline::Text(text.to_string()));
        }
    }

    fn into_blocks(mut self) -> Vec<Block> {
        self.flush_inlines();
        self.blocks
    }
}

fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options
}

fn open_for(tag: Tag<'_>) -> Open {
    match tag {
        Tag::Paragraph => Open::Paragraph,
        Tag::Heading { level, .. } => Open::Heading(level as u8),
        Tag::BlockQuote(_) => Open::BlockQuote,
        Tag::List(start) => Open::List(start),
        Tag::Item => Open::Item,
        Tag::CodeBlock(CodeBlockKind::Fenced(info)) => Open::CodeBlock(info.to_string()),
        Tag::CodeBlock(CodeBlockKind::Indented) => Open::CodeBlock(String::new()),
        Tag::HtmlBlock => Open::HtmlBlock,
        Tag::Table(alignments) => Open::Table(
            alignments
                .into_iter()
                .map(|a| match a {
                    pulldown_cmark::Alignment::None => Alignment::None,
                    pulldown_cmark::Alignment::Left => Alignment::Left,
                    pulldown_cmark::Alignment::Center => Alignment::Center,
                    pulldown_cmark::Alignment::Right => Alignment::Right,
                })
                .collect(),
        ),
        Tag::TableHead => Open::TableHead,
        Tag::TableRow => Open::TableRow,
        Tag::TableCell => Open::TableCell,
        Tag::Emphasis => Open::Emphasis,
        Tag::Strong => Open::Strong,
        Tag::Strikethrough => Open::Strikethrough,
        Tag::Link {
            dest_url, title, ..
        } => Open::Link {
            dest: dest_url.to_string(),
            title: title.to_string(),
        },
        Tag::Image {
            dest_url, title, ..
        } => Open::Image {
            dest: dest_url.to_string(),
            title: title.to_string(),
        },
        _ => Open::Transparent,
    }
}

/// Parses CommonMark (plus tables and strikethrough) into a [`Document`].
/// Never fails; unsupported constructs are flattened into their parent.
pub fn parse_markdown(markdown: &str) -> Document {
    let mut stack: Vec<Frame> = vec![Frame::new(Open::Root)];

    for event in Parser::new_ext(markdown, options()) {
        match event {
            Event::Start(tag) => stack.push(Frame::new(open_for(tag))),
            Event::End(_) => {
                if stack.len() > 1 {
                    if let Some(frame) = stack.pop() {
                        close(frame, &mut stack);
                    }
                }
            }
            Event::Text(text) => {
                let Some(top) = stack.last_mut() else { continue };
                if top.collects_literal() {
                    top.literal.push_str(&text);
                } else {
                    top.push_text(&text);
                }
            }
            Event::Code(code) => push_inline(&mut stack, Inline::Code(code.to_string())),
            Event::Html(html) | Event::InlineHtml(html) => {
                let Some(top) = stack.last_mut() else { continue };
                if top.collects_literal() {
                    top.literal.push_str(&html);
                } else {
                    top.inlines.push(Inline::Html(html.to_string()));
                }
            }
            Event::SoftBreak => push_inline(&mut stack, Inline::SoftBreak),
            Event::HardBreak => push_inline(&mut stack, Inline::HardBreak),
            Event::Rule => {
                if let Some(top) = stack.last_mut() {
                    top.push_block(Block::Rule);
                }
            }
            _ => {}
        }
    }

    // Unbalanced input cannot happen with pulldown-cmark, but fold any
    // leftovers rather than dropping them.
    while stack.len() > 1 {
        if let Some(frame) = stack.pop() {
            close(frame, &mut stack);
        }
    }

    let blocks = stack.pop().map(Frame::into_blocks).unwrap_or_default();
    Document { blocks }
}

fn push_inline(stack: &mut [Frame], inline: Inline) {
    if let Some(top) = stack.last_mut() {
        top.inlines.push(inline);
    }
}

fn close(mut frame: Frame, stack: &mut [Frame]) {
    let Some(parent) = stack.last_mut() else {
        return;
    };

    let open = std::mem::replace(&mut frame.open, Open::Root);
    match open {
        Open::Root => {}
        Open::Paragraph => parent.push_block(Block::Paragraph(frame.inlines)),
        Open::Heading(level) => parent.push_block(Block::Heading {
            level,
            content: frame.inlines,
        }),
        Open::BlockQuote => {
            let children = frame.into_blocks();
            parent.push_block(Block::BlockQuote(children));
        }
        Open::List(start) => parent.push_block(Block::List {
            start,
            items: frame.items,
        }),
        Open::Item => {
            let item = frame.into_blocks();
            parent.items.push(item);
        }
        Open::CodeBlock(info) => parent.push_block(Block::CodeBlock {
            info,
            literal: frame.literal,
        }),
        Open::HtmlBlock => parent.push_block(Block::Html(frame.literal)),
        Open::Table(alignments) => parent.push_block(Block::Table {
            alignments,
            head: frame.head,
            rows: frame.rows,
        }),
        Open::TableHead => parent.head = frame.cells,
        Open::TableRow => parent.rows.push(frame.cells),
        Open::TableCell => parent.cells.push(frame.inlines),
        Open::Emphasis => parent.inlines.push(Inline::Emphasis(frame.inlines)),
        Open::Strong => parent.inlines.push(Inline::Strong(frame.inlines)),
        Open::Strikethrough => parent.inlines.push(Inline::Strikethrough(frame.inlines)),
        Open::Link { dest, title } => parent.inlines.push(Inline::Link {
            dest,
            title,
            content: frame.inlines,
        }),
        Open::Image { dest, title } => parent.inlines.push(Inline::Image {
            dest,
            title,
            alt: frame.inlines,
        }),
        Open::Transparent => {
            frame.flush_inlines();
            for block in frame.blocks {
                parent.push_block(block);
            }
            for inlines in frame.items {
                for block in inlines {
                    parent.push_block(block);
                }
            }
        }
    }
}
