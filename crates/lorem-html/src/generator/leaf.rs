use strum::{Display, EnumIter, IntoStaticStr};

use crate::ast::{tags, Node};

/// Kinds of leaves placed at the last level of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum LeafKind {
    /// `<p>` with a sentence.
    Paragraph,
    /// `<a href>` pointing at a reserved domain.
    Link,
    /// `<span>` with a sentence.
    Span,
    /// `<ul>` with a few short items.
    List,
    /// `<h1>` to `<h3>` with a sentence.
    Heading,
    /// `<b>` with a sentence.
    Bold,
    /// `<i>` with a sentence.
    Italic,
    /// `<table>` with a header row and a body.
    Table,
    /// A bare text node.
    Text,
}

impl LeafKind {
    /// Maps a roll in `1..=10` to a leaf kind. Rolls past the eight tagged
    /// kinds fall back to bare text, which therefore comes up twice as often.
    pub fn from_roll(roll: u32) -> Self {
        match roll {
            1 => LeafKind::Paragraph,
            2 => LeafKind::Link,
            3 => LeafKind::Span,
            4 => LeafKind::List,
            5 => LeafKind::Heading,
            6 => LeafKind::Bold,
            7 => LeafKind::Italic,
            8 => LeafKind::Table,
            _ => LeafKind::Text,
        }
    }

    /// Recognizes the leaf kind of a generated node, if it is a leaf.
    pub fn classify(node: &Node) -> Option<Self> {
        let element = match node {
            Node::Text(_) => return Some(LeafKind::Text),
            Node::Element(element) => element,
        };
        let kind = match element.tag.as_str() {
            tags::P => LeafKind::Paragraph,
            tags::A => LeafKind::Link,
            tags::SPAN => LeafKind::Span,
            tags::UL => LeafKind::List,
            tags::H1 | tags::H2 | tags::H3 => LeafKind::Heading,
            tags::B => LeafKind::Bold,
            tags::I => LeafKind::Italic,
            tags::TABLE => LeafKind::Table,
            _ => return None,
        };
        Some(kind)
    }
}

/// Text lengths and counts of each leaf kind.
///
/// Sentence leaves (paragraph, link, span, heading, bold, italic, text) use
/// the caller's `max_length`; the presets below shape lists and tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeafPresets {
    /// Upper bound of table body rows. `None` follows `max_length`.
    pub table_max_rows: Option<u32>,
    /// Upper bound of table columns.
    pub table_max_cols: u32,
    /// Upper bound of words in a header cell.
    pub table_header_words: u32,
    /// Upper bound of words in a body cell.
    pub table_cell_words: u32,
    /// Upper bound of list items. `None` follows `max_length`.
    pub list_max_items: Option<u32>,
    /// Upper bound of words in a list item.
    pub list_item_words: u32,
    /// Digits of a random container `id`.
    pub id_digits: u32,
}

impl Default for LeafPresets {
    fn default() -> Self {
        Self {
            table_max_rows: None,
            table_max_cols: 6,
            table_header_words: 4,
            table_cell_words: 10,
            list_max_items: None,
            list_item_words: 4,
            id_digits: 5,
        }
    }
}
