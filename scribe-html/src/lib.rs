//! HTML rendering of Scribe documents.
//!
//! Produces one top-level element per block, newline separated:
//!
//! ```text
//! <h1>Title</h1>
//! <p>Some <strong>bold</strong> and <code class="description" data-description="hi">noted</code> text</p>
//! <ul>
//!   <li>first</li>
//!   <li>second</li>
//! </ul>
//! ```
//!
//! Consecutive list items of the same kind share one list element. Spans
//! chosen by the decorator are wrapped in `<code class="…">`.

use html_escape::{encode_double_quoted_attribute, encode_text};
use scribe_model::{Block, DecoratedSpan, Decorator, Document, Entity, EntityMap};
use scribe_types::{BlockType, InlineStyle};
use std::collections::BTreeSet;
use std::ops::Range;

/// Renders `document` to HTML, decorating spans with `decorator`.
#[must_use]
pub fn to_html(document: &Document, decorator: &Decorator) -> String {
    let mut renderer = HtmlRenderer::new(document.entities(), decorator);
    for block in document.blocks() {
        renderer.render_block(block);
    }
    renderer.finish()
}

struct HtmlRenderer<'a> {
    output: String,
    open_list: Option<BlockType>,
    entities: &'a EntityMap,
    decorator: &'a Decorator,
}

impl<'a> HtmlRenderer<'a> {
    fn new(entities: &'a EntityMap, decorator: &'a Decorator) -> Self {
        Self {
            output: String::new(),
            open_list: None,
            entities,
            decorator,
        }
    }

    fn render_block(&mut self, block: &Block) {
        let block_type = block.block_type();
        if block_type.is_list_item() {
            if self.open_list != Some(block_type) {
                self.close_list();
                self.push_line(&format!("<{}>", list_tag(block_type)));
                self.open_list = Some(block_type);
            }
            let inline = self.render_inline(block);
            self.push_line(&format!("  <li>{inline}</li>"));
            return;
        }

        self.close_list();
        let inline = self.render_inline(block);
        let line = match block_type {
            BlockType::HeaderOne => format!("<h1>{inline}</h1>"),
            BlockType::HeaderTwo => format!("<h2>{inline}</h2>"),
            BlockType::HeaderThree => format!("<h3>{inline}</h3>"),
            BlockType::Blockquote => format!("<blockquote>{inline}</blockquote>"),
            BlockType::CodeBlock => format!("<pre><code>{inline}</code></pre>"),
            _ if block.is_empty() => "<p><br></p>".to_string(),
            _ => format!("<p>{inline}</p>"),
        };
        self.push_line(&line);
    }

    fn render_inline(&self, block: &Block) -> String {
        let spans = self.decorator.decorate(block, self.entities);
        let mut out = String::new();
        let mut pos = 0;
        for span in &spans {
            render_styled(block, pos..span.range.start, &mut out);
            out.push_str(&self.open_decoration(span));
            render_styled(block, span.range.clone(), &mut out);
            out.push_str("</code>");
            pos = span.range.end;
        }
        render_styled(block, pos..block.len(), &mut out);
        out
    }

    fn open_decoration(&self, span: &DecoratedSpan) -> String {
        let class = encode_double_quoted_attribute(&span.class_name);
        let description = span
            .entity
            .and_then(|key| self.entities.get(key))
            .and_then(Entity::description);
        match description {
            Some(text) => format!(
                "<code class=\"{class}\" data-description=\"{}\">",
                encode_double_quoted_attribute(text)
            ),
            None => format!("<code class=\"{class}\">"),
        }
    }

    fn close_list(&mut self) {
        if let Some(list) = self.open_list.take() {
            self.push_line(&format!("</{}>", list_tag(list)));
        }
    }

    fn push_line(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }

    fn finish(mut self) -> String {
        self.close_list();
        self.output
    }
}

fn list_tag(block_type: BlockType) -> &'static str {
    match block_type {
        BlockType::OrderedListItem => "ol",
        _ => "ul",
    }
}

fn style_tag(style: InlineStyle) -> &'static str {
    match style {
        InlineStyle::Bold => "strong",
        InlineStyle::Italic => "em",
        InlineStyle::Underline => "u",
        InlineStyle::Code => "code",
        InlineStyle::Strikethrough => "del",
    }
}

/// Writes `range` of `block`, wrapping each run of equally-styled characters
/// in its style tags.
fn render_styled(block: &Block, range: Range<usize>, out: &mut String) {
    let characters = block.characters();
    let mut start = range.start;
    while start < range.end {
        let styles: &BTreeSet<InlineStyle> = characters[start].styles();
        let mut end = start + 1;
        while end < range.end && characters[end].styles() == styles {
            end += 1;
        }
        for style in styles {
            out.push_str(&format!("<{}>", style_tag(*style)));
        }
        out.push_str(&encode_text(block.slice(start..end)));
        for style in styles.iter().rev() {
            out.push_str(&format!("</{}>", style_tag(*style)));
        }
        start = end;
    }
}
