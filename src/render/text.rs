use super::tree::{collect_inline_text, Block, Document, Inline};

impl Document {
    /// Plain-text form with markdown syntax removed. Blocks are separated by a
    /// blank line; list items get a bullet or their ordinal, callouts are
    /// prefixed with their label.
    pub fn to_plain_text(&self) -> String {
        let mut paragraphs = Vec::new();
        push_blocks(&self.blocks, "", &mut paragraphs);
        paragraphs.join("\n\n")
    }
}

fn inline_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    for inline in inlines {
        match inline {
            Inline::SoftBreak => out.push(' '),
            Inline::HardBreak => out.push('\n'),
            other => collect_inline_text(std::slice::from_ref(other), &mut out),
        }
    }
    out.trim().to_string()
}

fn push_blocks(blocks: &[Block], indent: &str, out: &mut Vec<String>) {
    for block in blocks {
        push_block(block, indent, out);
    }
}

fn push_block(block: &Block, indent: &str, out: &mut Vec<String>) {
    match block {
        Block::Paragraph(content) | Block::Plain(content) | Block::Heading { content, .. } => {
            let text = inline_text(content);
            if !text.is_empty() {
                out.push(format!("{}{}", indent, text));
            }
        }
        Block::BlockQuote(children) => push_blocks(children, indent, out),
        Block::Callout { kind, children } => {
            let mut inner = Vec::new();
            push_blocks(children, "", &mut inner);
            out.push(format!("{}{}: {}", indent, kind.label(), inner.join("\n")));
        }
        Block::List { start, items } => {
            let mut lines = Vec::new();
            for (idx, item) in items.iter().enumerate() {
                let marker = match start {
                    Some(n) => format!("{}. ", n + idx as u64),
                    None => "• ".to_string(),
                };
                let nested_indent = format!("{}  ", indent);
                let mut parts = Vec::new();
                push_blocks(item, &nested_indent, &mut parts);
                let mut body = parts.join("\n");
                if let Some(stripped) = body.strip_prefix(nested_indent.as_str()) {
                    body = stripped.to_string();
                }
                lines.push(format!("{}{}{}", indent, marker, body));
            }
            out.push(lines.join("\n"));
        }
        Block::CodeBlock { literal, .. } => out.push(literal.trim_end().to_string()),
        Block::Html(_) | Block::Rule => {}
        Block::Table { head, rows, .. } => {
            let mut lines = Vec::new();
            for row in std::iter::once(head).chain(rows.iter()) {
                let cells: Vec<String> = row.iter().map(|cell| inline_text(cell)).collect();
                lines.push(format!("{}{}", indent, cells.join("\t")));
            }
            out.push(lines.join("\n"));
        }
    }
}
