//! HTML element definitions for the document tree.

use super::Node;
use ecow::EcoString;

/// Tag names used by the generator.
pub mod tags {
    #![allow(missing_docs)]

    pub const HTML: &str = "html";
    pub const HEAD: &str = "head";
    pub const BODY: &str = "body";
    pub const DIV: &str = "div";
    pub const P: &str = "p";
    pub const A: &str = "a";
    pub const SPAN: &str = "span";
    pub const TABLE: &str = "table";
    pub const THEAD: &str = "thead";
    pub const TBODY: &str = "tbody";
    pub const TR: &str = "tr";
    pub const TD: &str = "td";
    pub const TH: &str = "th";
    pub const UL: &str = "ul";
    pub const LI: &str = "li";
    pub const H1: &str = "h1";
    pub const H2: &str = "h2";
    pub const H3: &str = "h3";
    pub const B: &str = "b";
    pub const I: &str = "i";
    pub const TITLE: &str = "title";
    pub const FORM: &str = "form";
    pub const INPUT: &str = "input";
    pub const LABEL: &str = "label";

    /// Heading tags, indexed by `level - 1`.
    pub const HEADINGS: [&str; 3] = [H1, H2, H3];
}

/// HTML attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlAttribute {
    /// Attribute name
    pub name: EcoString,
    /// Attribute value
    pub value: EcoString,
}

/// HTML element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlElement {
    /// HTML tag name
    pub tag: EcoString,
    /// HTML attributes, in insertion order
    pub attributes: Vec<HtmlAttribute>,
    /// Child nodes, in insertion order
    pub children: Vec<Node>,
    /// Whether this is a void element (`<input />`)
    pub self_closing: bool,
}

impl HtmlElement {
    /// Creates an empty element.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            self_closing: false,
        }
    }

    /// Create a new void element, which never holds children.
    pub fn void(tag: &str) -> Self {
        Self::new(tag).self_closing(true)
    }

    /// Create an element holding a single text node.
    pub fn with_text(tag: &str, text: impl Into<EcoString>) -> Self {
        let mut element = Self::new(tag);
        element.push_text(text);
        element
    }

    /// Sets an attribute, see [`Self::set_attribute`].
    pub fn with_attribute(mut self, name: &str, value: impl Into<EcoString>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Replaces the children.
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Marks the element as void.
    pub fn self_closing(mut self, is_self_closing: bool) -> Self {
        self.self_closing = is_self_closing;
        self
    }

    /// Sets an attribute, replacing the value of an existing one with the
    /// same name.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<EcoString>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|attr| attr.name == name) {
            Some(attr) => attr.value = value,
            None => self.attributes.push(HtmlAttribute {
                name: name.into(),
                value,
            }),
        }
    }

    /// Gets the value of an attribute.
    pub fn attribute(&self, name: &str) -> Option<&EcoString> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| &attr.value)
    }

    /// Appends a child element.
    pub fn push_element(&mut self, element: HtmlElement) {
        self.children.push(Node::Element(element));
    }

    /// Appends a text node.
    pub fn push_text(&mut self, text: impl Into<EcoString>) {
        self.children.push(Node::Text(text.into()));
    }

    /// Iterates over the element children, skipping text nodes.
    pub fn child_elements(&self) -> impl Iterator<Item = &HtmlElement> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Whether the tag is one of `tags`, ignoring ASCII case.
    pub fn tag_matches_any(&self, tags: &[&str]) -> bool {
        tags.iter().any(|tag| tag.eq_ignore_ascii_case(&self.tag))
    }
}
