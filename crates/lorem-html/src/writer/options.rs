/// How the writer treats unsafe names and whole documents.
///
/// # Example
///
/// ```rust
/// use lorem_html::{HtmlWriter, HtmlWriterOptions};
///
/// let options = HtmlWriterOptions::default()
///     .with_strict(false)
///     .with_doctype(true);
///
/// let writer = HtmlWriter::with_options(options);
/// assert!(writer.options().doctype);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlWriterOptions {
    /// Determines if unsafe tag or attribute names are errors (`true`) or get
    /// textualized with a warning (`false`).
    pub strict: bool,
    /// Whether documents are prefixed with `<!DOCTYPE html>`.
    pub doctype: bool,
}

impl Default for HtmlWriterOptions {
    fn default() -> Self {
        Self {
            strict: true,
            doctype: false,
        }
    }
}

impl HtmlWriterOptions {
    /// Sets whether unsafe names are errors.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets whether documents start with a doctype.
    pub fn with_doctype(mut self, doctype: bool) -> Self {
        self.doctype = doctype;
        self
    }
}
