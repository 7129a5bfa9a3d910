//! Random document generator.
//!
//! [`HtmlRandomizer`] grows a random tree below the `body` of a fresh
//! [`Document`]: every level holds between one and `max_width` siblings,
//! which are `div` containers until the last level and text leaves there.
//! Each container draws its own remaining depth, so branches may stop early
//! and `max_depth` is an upper bound rather than the depth of every branch.

use ecow::{eco_format, EcoString};

use crate::ast::{tags, Document, HtmlElement, Node};
use crate::random::RandomSource;
use crate::text::{LoremText, TextProvider};
use crate::writer::{HtmlWriteResult, HtmlWriter, HtmlWriterOptions};

mod leaf;

pub use self::leaf::{LeafKind, LeafPresets};


/// Options of a [`HtmlRandomizer`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RandomizerOptions {
    /// Prepends a login form (username, password, submit) to the body.
    pub login_form: bool,
    /// Text lengths and counts of each leaf kind.
    pub presets: LeafPresets,
    /// Options used when serializing the generated document.
    pub writer: HtmlWriterOptions,
}

impl RandomizerOptions {
    /// Sets whether a login form is prepended to the body.
    pub fn with_login_form(mut self, login_form: bool) -> Self {
        self.login_form = login_form;
        self
    }

    /// Sets the leaf presets.
    pub fn with_presets(mut self, presets: LeafPresets) -> Self {
        self.presets = presets;
        self
    }

    /// Sets the writer options.
    pub fn with_writer(mut self, writer: HtmlWriterOptions) -> Self {
        self.writer = writer;
        self
    }
}

/// Generates random HTML documents.
///
/// ```rust
/// use lorem_html::HtmlRandomizer;
///
/// let a = HtmlRandomizer::seeded(7).random_html(4, 4, 10).unwrap();
/// let b = HtmlRandomizer::seeded(7).random_html(4, 4, 10).unwrap();
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone)]
pub struct HtmlRandomizer<T = LoremText, R = fastrand::Rng> {
    text: T,
    rng: R,
    options: RandomizerOptions,
}

impl Default for HtmlRandomizer {
    fn default() -> Self {
        Self::new(LoremText::default(), fastrand::Rng::new())
    }
}

impl HtmlRandomizer {
    /// Creates a randomizer whose output is fully determined by `seed`.
    pub fn seeded(seed: u64) -> Self {
        let mut rng = fastrand::Rng::with_seed(seed);
        let text = LoremText::seeded(rng.u64(..));
        Self::new(text, rng)
    }
}

impl<T: TextProvider, R: RandomSource> HtmlRandomizer<T, R> {
    /// Creates a randomizer over the given text provider and random source.
    pub fn new(text: T, rng: R) -> Self {
        Self {
            text,
            rng,
            options: RandomizerOptions::default(),
        }
    }

    /// Replaces the options.
    pub fn with_options(mut self, options: RandomizerOptions) -> Self {
        self.options = options;
        self
    }

    /// Gets a reference to the current options.
    pub fn options(&self) -> &RandomizerOptions {
        &self.options
    }

    /// Gets the text provider, e.g. to draw titles from the same stream.
    pub fn text_mut(&mut self) -> &mut T {
        &mut self.text
    }

    /// Gets the random source.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Generates a random document.
    ///
    /// A bound of zero yields the minimal document: a title and an empty
    /// body.
    pub fn random_document(&mut self, max_depth: u32, max_width: u32, max_length: u32) -> Document {
        let mut document = Document::new();
        self.add_random_title(&mut document.head, max_length.max(1));

        if self.options.login_form {
            self.add_login_form(&mut document.body);
        }
        if max_width > 0 && max_length > 0 {
            self.add_random_subtree(&mut document.body, max_depth, max_width, max_length);
        }

        log::debug!(
            "generated document: depth <= {max_depth}, width <= {max_width}, {} body children",
            document.body.children.len()
        );
        document
    }

    /// Generates a random document and writes it to markup.
    pub fn random_html(
        &mut self,
        max_depth: u32,
        max_width: u32,
        max_length: u32,
    ) -> HtmlWriteResult<EcoString> {
        let document = self.random_document(max_depth, max_width, max_length);
        let mut writer = HtmlWriter::with_options(self.options.writer.clone());
        writer.write_document(&document)?;
        writer.into_string()
    }

    /// Generates a random document and writes only the body's content,
    /// suitable as the markup of a post.
    pub fn random_fragment(
        &mut self,
        max_depth: u32,
        max_width: u32,
        max_length: u32,
    ) -> HtmlWriteResult<EcoString> {
        let document = self.random_document(max_depth, max_width, max_length);
        let mut writer = HtmlWriter::with_options(self.options.writer.clone());
        writer.write_nodes(&document.body.children)?;
        writer.into_string()
    }

    fn add_random_subtree(
        &mut self,
        root: &mut HtmlElement,
        max_depth: u32,
        max_width: u32,
        max_length: u32,
    ) {
        let max_depth = max_depth.saturating_sub(1);
        if max_depth == 0 {
            return;
        }

        let siblings = self.rng.int(1, max_width);
        for _ in 0..siblings {
            if max_depth == 1 {
                self.add_random_leaf(root, max_length);
            } else {
                let mut sibling = HtmlElement::new(tags::DIV);
                self.add_random_attribute(&mut sibling);
                let depth = self.rng.int(0, max_depth);
                self.add_random_subtree(&mut sibling, depth, max_width, max_length);
                root.push_element(sibling);
            }
        }
    }

    fn add_random_leaf(&mut self, node: &mut HtmlElement, max_length: u32) {
        let kind = LeafKind::from_roll(self.rng.int(1, 10));
        let presets = self.options.presets;
        match kind {
            LeafKind::Paragraph => self.add_text_element(node, tags::P, max_length),
            LeafKind::Link => {
                let text = self.random_sentence(max_length);
                let href = self.text.safe_email_domain();
                node.push_element(HtmlElement::with_text(tags::A, text).with_attribute("href", href));
            }
            LeafKind::Span => self.add_text_element(node, tags::SPAN, max_length),
            LeafKind::List => {
                let max_items = presets.list_max_items.unwrap_or(max_length);
                let list = self.random_list(max_items, presets.list_item_words);
                node.push_element(list);
            }
            LeafKind::Heading => {
                let level = self.rng.int(1, tags::HEADINGS.len() as u32);
                let tag = tags::HEADINGS[level as usize - 1];
                self.add_text_element(node, tag, max_length);
            }
            LeafKind::Bold => self.add_text_element(node, tags::B, max_length),
            LeafKind::Italic => self.add_text_element(node, tags::I, max_length),
            LeafKind::Table => {
                let max_rows = presets.table_max_rows.unwrap_or(max_length);
                let table = self.random_table(&presets, max_rows);
                node.push_element(table);
            }
            LeafKind::Text => {
                let text = self.random_sentence(max_length);
                node.push_text(text);
            }
        }
    }

    fn add_random_attribute(&mut self, node: &mut HtmlElement) {
        if self.rng.int(1, 2) == 1 {
            let class = self.text.word();
            node.set_attribute("class", class);
        } else {
            let id = self.text.random_number(self.options.presets.id_digits);
            node.set_attribute("id", eco_format!("{id}"));
        }
    }

    fn random_sentence(&mut self, max_words: u32) -> EcoString {
        let words = self.rng.int(1, max_words);
        self.text.sentence(words, true)
    }

    fn add_text_element(&mut self, node: &mut HtmlElement, tag: &str, max_length: u32) {
        let text = self.random_sentence(max_length);
        node.push_element(HtmlElement::with_text(tag, text));
    }

    fn add_random_title(&mut self, head: &mut HtmlElement, max_length: u32) {
        self.add_text_element(head, tags::TITLE, max_length);
    }

    fn random_list(&mut self, max_items: u32, item_words: u32) -> HtmlElement {
        let count = self.rng.int(1, max_items.max(1));
        let mut list = HtmlElement::new(tags::UL);
        for _ in 0..count {
            let text = self.random_sentence(item_words);
            list.push_element(HtmlElement::with_text(tags::LI, text));
        }
        list
    }

    fn random_table(&mut self, presets: &LeafPresets, max_rows: u32) -> HtmlElement {
        let rows = self.rng.int(1, max_rows.max(1));
        let cols = self.rng.int(1, presets.table_max_cols.max(1));

        let mut head_row = HtmlElement::new(tags::TR);
        for _ in 0..cols {
            let text = self.random_sentence(presets.table_header_words);
            head_row.push_element(HtmlElement::with_text(tags::TH, text));
        }

        let mut body = HtmlElement::new(tags::TBODY);
        for _ in 0..rows {
            let mut row = HtmlElement::new(tags::TR);
            for _ in 0..cols {
                let text = self.random_sentence(presets.table_cell_words);
                row.push_element(HtmlElement::with_text(tags::TD, text));
            }
            body.push_element(row);
        }

        HtmlElement::new(tags::TABLE).with_children(vec![
            HtmlElement::new(tags::THEAD)
                .with_children(vec![head_row.into()])
                .into(),
            body.into(),
        ])
    }

    fn add_login_form(&mut self, body: &mut HtmlElement) {
        let username_label = HtmlElement::with_text(tags::LABEL, self.text.word())
            .with_attribute("for", "username");
        let username = HtmlElement::void(tags::INPUT)
            .with_attribute("type", "text")
            .with_attribute("id", "username");
        let password_label = HtmlElement::with_text(tags::LABEL, self.text.word())
            .with_attribute("for", "password");
        let password = HtmlElement::void(tags::INPUT)
            .with_attribute("type", "password")
            .with_attribute("id", "password");
        let submit = HtmlElement::void(tags::INPUT)
            .with_attribute("type", "submit")
            .with_attribute("value", self.text.word());

        let form = HtmlElement::new(tags::FORM)
            .with_attribute("action", self.text.safe_email_domain())
            .with_attribute("method", "POST")
            .with_children(
                [username_label, username, password_label, password, submit]
                    .into_iter()
                    .map(Node::Element)
                    .collect(),
            );
        body.push_element(form);
    }
}
