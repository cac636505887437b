//! Markdown to Atlassian Document Format conversion and ADF node builders.
//!
//! Covers what Jira descriptions actually use: headings, paragraphs, bullet
//! lists (nested), strong/em marks, and links. Everything else degrades to
//! plain text.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use serde_json::{Value, json};

/// An ADF text node.
#[must_use]
pub fn text(content: &str) -> Value {
    json!({"type": "text", "text": content})
}

/// A text node carrying a link mark.
#[must_use]
pub fn link_text(content: &str, href: &str, title: &str) -> Value {
    json!({
        "type": "text",
        "text": content,
        "marks": [{"type": "link", "attrs": {"href": href, "title": title}}],
    })
}

/// An inline smart-card pointing at a URL.
#[must_use]
pub fn inline_card(url: &str) -> Value {
    json!({"type": "inlineCard", "attrs": {"url": url}})
}

/// A paragraph node over inline content.
#[must_use]
pub fn paragraph(content: Vec<Value>) -> Value {
    json!({"type": "paragraph", "content": content})
}

/// A heading node at `level`.
#[must_use]
pub fn heading(level: u8, content: Vec<Value>) -> Value {
    json!({"type": "heading", "attrs": {"level": level}, "content": content})
}

/// Wrap block nodes in a full ADF document.
#[must_use]
pub fn document(content: Vec<Value>) -> Value {
    json!({"version": 1, "type": "doc", "content": content})
}

/// Convert Markdown to a full ADF document.
#[must_use]
pub fn to_adf(markdown: &str) -> Value {
    document(to_adf_content(markdown))
}

/// Convert Markdown to ADF block nodes without the document wrapper, for
/// splicing into a hand-assembled description.
#[must_use]
pub fn to_adf_content(markdown: &str) -> Vec<Value> {
    let parser = Parser::new_ext(markdown, Options::empty());
    let mut converter = AdfConverter::default();
    for event in parser {
        converter.handle(event);
    }
    converter.finish()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Strong,
    Em,
}

/// A block under construction: its kind plus accumulated children.
#[derive(Debug)]
enum Block {
    Paragraph(Vec<Value>),
    Heading(u8, Vec<Value>),
    BulletList(Vec<Value>),
    ListItem(Vec<Value>),
}

#[derive(Debug, Default)]
struct AdfConverter {
    done: Vec<Value>,
    stack: Vec<Block>,
    marks: Vec<Mark>,
    link: Option<(String, String)>,
}

impl AdfConverter {
    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(Tag::Paragraph) => self.stack.push(Block::Paragraph(Vec::new())),
            Event::Start(Tag::Heading { level, .. }) => self
                .stack
                .push(Block::Heading(heading_level(level), Vec::new())),
            Event::Start(Tag::List(None)) => self.stack.push(Block::BulletList(Vec::new())),
            // Ordered lists degrade to bullet lists.
            Event::Start(Tag::List(Some(_))) => self.stack.push(Block::BulletList(Vec::new())),
            Event::Start(Tag::Item) => self.stack.push(Block::ListItem(Vec::new())),
            Event::Start(Tag::Strong) => self.marks.push(Mark::Strong),
            Event::Start(Tag::Emphasis) => self.marks.push(Mark::Em),
            Event::Start(Tag::Link {
                dest_url, title, ..
            }) => self.link = Some((dest_url.to_string(), title.to_string())),

            Event::End(TagEnd::Paragraph | TagEnd::Heading(_)) => self.close_leaf(),
            Event::End(TagEnd::List(_)) => self.close_list(),
            Event::End(TagEnd::Item) => self.close_item(),
            Event::End(TagEnd::Strong) => {
                self.marks.retain(|m| *m != Mark::Strong);
            }
            Event::End(TagEnd::Emphasis) => {
                self.marks.retain(|m| *m != Mark::Em);
            }
            Event::End(TagEnd::Link) => self.link = None,

            Event::Text(t) => self.push_inline_text(&t),
            Event::Code(t) => self.push_inline_text(&t),
            Event::SoftBreak | Event::HardBreak => self.push_inline_text("\n"),
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<Value> {
        while !self.stack.is_empty() {
            match self.stack.last() {
                Some(Block::BulletList(_)) => self.close_list(),
                Some(Block::ListItem(_)) => self.close_item(),
                _ => self.close_leaf(),
            }
        }
        self.done
    }

    fn push_inline_text(&mut self, content: &str) {
        let node = if let Some((href, title)) = &self.link {
            link_text(content, href, if title.is_empty() { content } else { title })
        } else {
            let mut node = text(content);
            let marks: Vec<Value> = self
                .marks
                .iter()
                .map(|m| match m {
                    Mark::Strong => json!({"type": "strong"}),
                    Mark::Em => json!({"type": "em"}),
                })
                .collect();
            if !marks.is_empty() {
                node["marks"] = Value::Array(marks);
            }
            node
        };
        self.push_inline(node);
    }

    fn push_inline(&mut self, node: Value) {
        match self.stack.last_mut() {
            Some(
                Block::Paragraph(children)
                | Block::Heading(_, children)
                | Block::ListItem(children),
            ) => children.push(node),
            // Inline content with no open block gets its own paragraph.
            _ => self.push_block(paragraph(vec![node])),
        }
    }

    fn push_block(&mut self, node: Value) {
        match self.stack.last_mut() {
            Some(Block::BulletList(items) | Block::ListItem(items)) => items.push(node),
            Some(Block::Paragraph(children) | Block::Heading(_, children)) => {
                children.push(node);
            }
            None => self.done.push(node),
        }
    }

    fn close_leaf(&mut self) {
        let block = match self.stack.pop() {
            Some(Block::Paragraph(children)) => paragraph(children),
            Some(Block::Heading(level, children)) => heading(level, children),
            Some(other) => {
                self.stack.push(other);
                return;
            }
            None => return,
        };
        self.push_block(block);
    }

    fn close_list(&mut self) {
        if let Some(Block::BulletList(items)) = self.stack.pop() {
            self.push_block(json!({"type": "bulletList", "content": items}));
        }
    }

    fn close_item(&mut self) {
        if let Some(Block::ListItem(children)) = self.stack.pop() {
            // Bare text inside an item still needs a paragraph wrapper.
            let mut content = Vec::new();
            let mut inline = Vec::new();
            for child in children {
                let is_inline = child
                    .get("type")
                    .and_then(Value::as_str)
                    .is_some_and(|t| t == "text" || t == "inlineCard");
                if is_inline {
                    inline.push(child);
                } else {
                    if !inline.is_empty() {
                        content.push(paragraph(std::mem::take(&mut inline)));
                    }
                    content.push(child);
                }
            }
            if !inline.is_empty() {
                content.push(paragraph(inline));
            }
            self.push_block(json!({"type": "listItem", "content": content}));
        }
    }
}

const fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
