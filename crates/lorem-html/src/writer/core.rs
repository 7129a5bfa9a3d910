use super::diagnostics::{Diagnostic, DiagnosticSink, NullSink};
use super::utils::{is_safe_attribute_name, is_safe_tag_name};
use super::visitor::{walk_node, NodeHandler};
use super::{HtmlWriteError, HtmlWriteResult, HtmlWriterOptions};
use crate::ast::{tags, Document, HtmlElement, Node};
use ecow::EcoString;
use std::fmt;

/// HTML writer for serializing the document tree.
///
/// # Examples
///
/// ## Writing nodes
///
/// ```rust
/// use lorem_html::{HtmlElement, HtmlWriter, Node};
///
/// let mut writer = HtmlWriter::new();
/// let para = HtmlElement::with_text("p", "Fish & chips");
/// writer.write_node(&Node::Element(para)).unwrap();
///
/// let output = writer.into_string().unwrap();
/// assert_eq!(output, "<p>Fish &amp; chips</p>");
/// ```
///
/// ## Driving the writer by hand
///
/// ```rust
/// use lorem_html::HtmlWriter;
///
/// let mut w = HtmlWriter::new();
/// w.start_tag("a").unwrap();
/// w.attribute("href", "example.com").unwrap();
/// w.finish_tag().unwrap();
/// w.text("Lorem <ipsum>").unwrap();
/// w.end_tag("a").unwrap();
///
/// assert_eq!(
///     w.into_string().unwrap(),
///     "<a href=\"example.com\">Lorem &lt;ipsum&gt;</a>"
/// );
/// ```
pub struct HtmlWriter {
    /// Writer options
    pub options: HtmlWriterOptions,
    /// Markup written so far
    buffer: EcoString,
    /// Whether the last start tag still lacks its `>`
    tag_opened: bool,
    /// Receives textualized elements.
    diagnostics: Box<dyn DiagnosticSink + 'static>,
}

impl fmt::Debug for HtmlWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HtmlWriter")
            .field("options", &self.options)
            .field("buffer", &self.buffer)
            .field("tag_opened", &self.tag_opened)
            .finish()
    }
}

impl Default for HtmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlWriter {
    /// Creates a strict writer.
    pub fn new() -> Self {
        Self::with_options(HtmlWriterOptions::default())
    }

    /// Creates a writer with `options`.
    pub fn with_options(options: HtmlWriterOptions) -> Self {
        HtmlWriter {
            options,
            buffer: EcoString::new(),
            tag_opened: false,
            diagnostics: Box::new(NullSink),
        }
    }

    /// Reports textualized elements to `sink`.
    pub fn with_diagnostic_sink(mut self, sink: Box<dyn DiagnosticSink + 'static>) -> Self {
        self.diagnostics = sink;
        self
    }

    /// Gets the options.
    pub fn options(&self) -> &HtmlWriterOptions {
        &self.options
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        log::warn!("{diagnostic}");
        self.diagnostics.emit(diagnostic);
    }

    /// Closes a pending start tag and returns the markup.
    pub fn into_string(mut self) -> HtmlWriteResult<EcoString> {
        self.ensure_tag_closed();
        Ok(self.buffer)
    }

    fn ensure_tag_closed(&mut self) {
        if self.tag_opened {
            self.buffer.push('>');
            self.tag_opened = false;
        }
    }

    /// Opens `<tag_name`; attributes may follow until [`Self::finish_tag`].
    pub fn start_tag(&mut self, tag_name: &str) -> HtmlWriteResult<()> {
        self.ensure_tag_closed();
        self.buffer.push('<');
        self.buffer.push_str(tag_name);
        self.tag_opened = true;
        Ok(())
    }

    /// Writes ` key="value"` with the value escaped.
    pub fn attribute(&mut self, key: &str, value: &str) -> HtmlWriteResult<()> {
        if !self.tag_opened {
            return Err(HtmlWriteError::NoOpenTag("attribute"));
        }
        self.buffer.push(' ');
        self.buffer.push_str(key);
        self.buffer.push_str("=\"");
        self.buffer
            .push_str(html_escape::encode_double_quoted_attribute(value).as_ref());
        self.buffer.push('"');
        Ok(())
    }

    /// Writes the `>` of the pending start tag.
    pub fn finish_tag(&mut self) -> HtmlWriteResult<()> {
        self.ensure_tag_closed();
        Ok(())
    }

    /// Writes ` />`, closing a void element.
    pub fn finish_self_closing_tag(&mut self) -> HtmlWriteResult<()> {
        if !self.tag_opened {
            return Err(HtmlWriteError::NoOpenTag("finish_self_closing_tag"));
        }
        self.buffer.push_str(" />");
        self.tag_opened = false;
        Ok(())
    }

    /// Writes `</tag_name>`.
    pub fn end_tag(&mut self, tag_name: &str) -> HtmlWriteResult<()> {
        self.ensure_tag_closed();
        self.buffer.push_str("</");
        self.buffer.push_str(tag_name);
        self.buffer.push('>');
        Ok(())
    }

    /// Writes text with `&`, `<` and `>` escaped.
    pub fn text(&mut self, text: &str) -> HtmlWriteResult<()> {
        self.ensure_tag_closed();
        self.buffer.push_str(html_escape::encode_text(text).as_ref());
        Ok(())
    }

    /// Writes markup that is trusted to be well-formed, without escaping.
    pub fn write_trusted_html(&mut self, html: &str) -> HtmlWriteResult<()> {
        self.ensure_tag_closed();
        self.buffer.push_str(html);
        Ok(())
    }

    /// Writes a node and its subtree.
    pub fn write_node(&mut self, node: &Node) -> HtmlWriteResult<()> {
        walk_node(self, node)
    }

    /// Writes a sequence of sibling nodes.
    pub fn write_nodes(&mut self, nodes: &[Node]) -> HtmlWriteResult<()> {
        self.visit_nodes(nodes)
    }

    /// Writes a whole document: `<html>`, its head and its body.
    pub fn write_document(&mut self, document: &Document) -> HtmlWriteResult<()> {
        if self.options.doctype {
            self.write_trusted_html("<!DOCTYPE html>\n")?;
        }
        self.start_tag(tags::HTML)?;
        self.finish_tag()?;
        self.write_html_element(&document.head)?;
        self.write_html_element(&document.body)?;
        self.end_tag(tags::HTML)
    }

    /// Writes an element, checking its tag and attribute names first.
    pub fn write_html_element(&mut self, element: &HtmlElement) -> HtmlWriteResult<()> {
        if !self.check_html_element(element)? {
            return self.textualize_html_element(element);
        }

        self.start_tag(&element.tag)?;
        for attr in &element.attributes {
            self.attribute(&attr.name, &attr.value)?;
        }
        if element.self_closing {
            return self.finish_self_closing_tag();
        }

        self.finish_tag()?;
        self.write_nodes(&element.children)?;
        self.end_tag(&element.tag)
    }

    /// Returns whether the element may be rendered as markup. In lenient mode
    /// an unsafe element is reported and must be textualized instead.
    fn check_html_element(&mut self, element: &HtmlElement) -> HtmlWriteResult<bool> {
        if !is_safe_tag_name(&element.tag) {
            if self.options.strict {
                return Err(HtmlWriteError::UnsafeTag(element.tag.clone()));
            }

            self.report(Diagnostic::UnsafeTag(element.tag.clone()));
            return Ok(false);
        }

        for attr in &element.attributes {
            if !is_safe_attribute_name(&attr.name) {
                if self.options.strict {
                    return Err(HtmlWriteError::UnsafeAttribute(attr.name.clone()));
                }

                self.report(Diagnostic::UnsafeAttribute {
                    tag: element.tag.clone(),
                    name: attr.name.clone(),
                });
                return Ok(false);
            }
        }

        Ok(true)
    }

    fn textualize_html_element(&mut self, element: &HtmlElement) -> HtmlWriteResult<()> {
        self.text("<")?;
        self.text(&element.tag)?;
        for attr in &element.attributes {
            self.text(" ")?;
            self.text(&attr.name)?;
            self.text("=\"")?;
            self.text(&attr.value)?;
            self.text("\"")?;
        }
        if element.self_closing {
            return self.text(" />");
        }

        self.text(">")?;
        self.write_nodes(&element.children)?;
        self.text("</")?;
        self.text(&element.tag)?;
        self.text(">")
    }
}

impl NodeHandler for HtmlWriter {
    type Error = HtmlWriteError;

    fn element(&mut self, element: &HtmlElement) -> HtmlWriteResult<()> {
        self.write_html_element(element)
    }

    fn text(&mut self, text: &EcoString) -> HtmlWriteResult<()> {
        HtmlWriter::text(self, text)
    }
}
