//! Node definitions for the document tree.

use super::html::{tags, HtmlElement};
use ecow::EcoString;

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element with attributes and children.
    Element(HtmlElement),
    /// An opaque text leaf. Escaped when written.
    Text(EcoString),
}

impl Node {
    /// Returns the element if this node is one.
    pub fn as_element(&self) -> Option<&HtmlElement> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }
}

impl From<HtmlElement> for Node {
    fn from(element: HtmlElement) -> Self {
        Node::Element(element)
    }
}

/// The root of a generated document.
///
/// A document always holds exactly one `head` and one `body`, written as
/// `<html><head>..</head><body>..</body></html>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// The `head` element.
    pub head: HtmlElement,
    /// The `body` element.
    pub body: HtmlElement,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a document with an empty head and body.
    pub fn new() -> Self {
        Self {
            head: HtmlElement::new(tags::HEAD),
            body: HtmlElement::new(tags::BODY),
        }
    }

    /// The text of the first `title` element in the head, if any.
    pub fn title(&self) -> Option<EcoString> {
        let title = self
            .head
            .child_elements()
            .find(|el| el.tag == tags::TITLE)?;
        Some(crate::writer::to_plain_text(&title.children))
    }
}
