//! Name checks and the plain-text rendering.

use crate::ast::{tags, HtmlElement, Node};
use crate::writer::visitor::{walk_node, NodeHandler};
use ecow::EcoString;
use std::convert::Infallible;

fn is_name(name: &str, punct: &[char]) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || punct.contains(&c))
}

/// Tag names are ASCII alphanumerics plus `_`, `:` and `-`.
pub(crate) fn is_safe_tag_name(tag: &str) -> bool {
    is_name(tag, &['_', ':', '-'])
}

/// Attribute names additionally allow `.`.
pub(crate) fn is_safe_attribute_name(name: &str) -> bool {
    is_name(name, &['_', ':', '-', '.'])
}

/// Block-level tags after which the plain-text rendering breaks the line.
const LINE_BREAKING_TAGS: &[&str] = &[
    tags::DIV,
    tags::P,
    tags::H1,
    tags::H2,
    tags::H3,
    tags::UL,
    tags::LI,
    tags::TABLE,
    tags::TR,
    tags::TITLE,
    tags::FORM,
];

struct PlainTextCollector<'a> {
    buffer: &'a mut EcoString,
}

impl<'a> PlainTextCollector<'a> {
    fn new(buffer: &'a mut EcoString) -> Self {
        Self { buffer }
    }

    fn push_space(&mut self) {
        if !self.buffer.is_empty() && !self.buffer.ends_with(|c: char| c == ' ' || c == '\n') {
            self.buffer.push(' ');
        }
    }

    fn push_newline(&mut self) {
        if self.buffer.ends_with(' ') {
            self.buffer.pop();
        }
        if !self.buffer.is_empty() && !self.buffer.ends_with('\n') {
            self.buffer.push('\n');
        }
    }
}

impl NodeHandler for PlainTextCollector<'_> {
    type Error = Infallible;

    fn element(&mut self, element: &HtmlElement) -> Result<(), Self::Error> {
        self.visit_nodes(&element.children)?;
        if element.tag_matches_any(LINE_BREAKING_TAGS) {
            self.push_newline();
        } else {
            self.push_space();
        }
        Ok(())
    }

    fn text(&mut self, text: &EcoString) -> Result<(), Self::Error> {
        self.buffer.push_str(text);
        self.push_space();
        Ok(())
    }
}

/// Renders nodes to plain text.
///
/// Block-level elements end their line, inline ones are separated by a
/// single space. Markup is dropped entirely.
pub fn to_plain_text(nodes: &[Node]) -> EcoString {
    let mut buffer = EcoString::new();
    let mut collector = PlainTextCollector::new(&mut buffer);
    for node in nodes {
        let _ = walk_node(&mut collector, node);
    }
    buffer.trim_end().into()
}
