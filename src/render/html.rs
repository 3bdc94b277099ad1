use super::tree::{Alignment, Block, Document, Inline};

pub fn escape_html(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

impl Document {
    /// Renders the tree as an HTML fragment. Raw HTML embedded in the markdown
    /// is escaped rather than passed through.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_blocks(&self.blocks, &mut out);
        out
    }
}

fn write_blocks(blocks: &[Block], out: &mut String) {
    for block in blocks {
        write_block(block, out);
    }
}

fn write_block(block: &Block, out: &mut String) {
    match block {
        Block::Paragraph(content) => {
            out.push_str("<p>");
            write_inlines(content, out);
            out.push_str("</p>\n");
        }
        Block::Plain(content) => {
            write_inlines(content, out);
            out.push('\n');
        }
        Block::Heading { level, content } => {
            out.push_str(&format!("<h{}>", level));
            write_inlines(content, out);
            out.push_str(&format!("</h{}>\n", level));
        }
        Block::BlockQuote(children) => {
            out.push_str("<blockquote>\n");
            write_blocks(children, out);
            out.push_str("</blockquote>\n");
        }
        Block::Callout { kind, children } => {
            out.push_str(&format!(
                "<div class=\"callout-box {}\">\n<span class=\"callout-label\">{}</span>\n",
                kind.css_class(),
                kind.label()
            ));
            write_blocks(children, out);
            out.push_str("</div>\n");
        }
        Block::List { start, items } => {
            let close = match start {
                Some(1) => {
                    out.push_str("<ol>\n");
                    "</ol>\n"
                }
                Some(n) => {
                    out.push_str(&format!("<ol start=\"{}\">\n", n));
                    "</ol>\n"
                }
                None => {
                    out.push_str("<ul>\n");
                    "</ul>\n"
                }
            };
            for item in items {
                out.push_str("<li>");
                write_blocks(item, out);
                out.push_str("</li>\n");
            }
            out.push_str(close);
        }
        Block::CodeBlock { info, literal } => {
            let lang = info.split_whitespace().next().unwrap_or("");
            if lang.is_empty() {
                out.push_str("<pre><code>");
            } else {
                out.push_str("<pre><code class=\"language-");
                escape_html(lang, out);
                out.push_str("\">");
            }
            escape_html(literal, out);
            out.push_str("</code></pre>\n");
        }
        Block::Html(html) => {
            out.push_str("<p>");
            escape_html(html, out);
            out.push_str("</p>\n");
        }
        Block::Table {
            alignments,
            head,
            rows,
        } => {
            out.push_str("<table>\n<thead>\n<tr>");
            for (idx, cell) in head.iter().enumerate() {
                write_cell("th", alignments.get(idx), cell, out);
            }
            out.push_str("</tr>\n</thead>\n<tbody>\n");
            for row in rows {
                out.push_str("<tr>");
                for (idx, cell) in row.iter().enumerate() {
                    write_cell("td", alignments.get(idx), cell, out);
                }
                out.push_str("</tr>\n");
            }
            out.push_str("</tbody>\n</table>\n");
        }
        Block::Rule => out.push_str("<hr />\n"),
    }
}

fn write_cell(tag: &str, alignment: Option<&Alignment>, content: &[Inline], out: &mut String) {
    let style = match alignment {
        Some(Alignment::Left) => " style=\"text-align: left\"",
        Some(Alignment::Center) => " style=\"text-align: center\"",
        Some(Alignment::Right) => " style=\"text-align: right\"",
        Some(Alignment::None) | None => "",
    };
    out.push_str(&format!("<{}{}>", tag, style));
    write_inlines(content, out);
    out.push_str(&format!("</{}>", tag));
}

fn write_inlines(inlines: &[Inline], out: &mut String) {
    for inline in inlines {
        match inline {
            Inline::Text(text) | Inline::Html(text) => escape_html(text, out),
            Inline::Code(code) if code.is_empty() => {}
            Inline::Code(code) => {
                out.push_str("<code>");
                escape_html(code, out);
                out.push_str("</code>");
            }
            Inline::Emphasis(children) => wrap("em", children, out),
            Inline::Strong(children) => wrap("strong", children, out),
            Inline::Strikethrough(children) => wrap("del", children, out),
            Inline::Link {
                dest,
                title,
                content,
            } => {
                out.push_str("<a href=\"");
                escape_html(dest, out);
                out.push('"');
                if !title.is_empty() {
                    out.push_str(" title=\"");
                    escape_html(title, out);
                    out.push('"');
                }
                out.push('>');
                write_inlines(content, out);
                out.push_str("</a>");
            }
            Inline::Image { dest, title, alt } => {
                let mut alt_text = String::new();
                super::tree::collect_inline_text(alt, &mut alt_text);
                out.push_str("<img src=\"");
                escape_html(dest, out);
                out.push_str("\" alt=\"");
                escape_html(&alt_text, out);
                out.push('"');
                if !title.is_empty() {
                    out.push_str(" title=\"");
                    escape_html(title, out);
                    out.push('"');
                }
                out.push_str(" />");
            }
            Inline::SoftBreak => out.push('\n'),
            Inline::HardBreak => out.push_str("<br />\n"),
        }
    }
}

fn wrap(tag: &str, children: &[Inline], out: &mut String) {
    out.push_str(&format!("<{}>", tag));
    write_inlines(children, out);
    out.push_str(&format!("</{}>", tag));
}
