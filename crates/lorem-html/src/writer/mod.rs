//! HTML writer for the document tree.
//!
//! The writer serializes a [`Document`](crate::ast::Document) or individual
//! [`Node`](crate::ast::Node)s to markup, escaping text and attribute values
//! so that the output stays well-formed whatever the text holds.

/// The core `HtmlWriter` and its implementation for generating HTML.
mod core;
/// Reports of textualized elements.
pub mod diagnostics;
/// HTML error types used during HTML writing.
pub mod error;
/// Options for configuring HTML rendering behavior.
pub mod options;
mod utils;
/// Shared traversal over the document tree.
pub mod visitor;

pub use self::core::HtmlWriter;
pub use self::diagnostics::{Diagnostic, DiagnosticSink, NullSink};
pub use self::error::{HtmlWriteError, HtmlWriteResult};
pub use self::options::HtmlWriterOptions;
pub use self::utils::to_plain_text;
pub use self::visitor::{walk_node, NodeHandler};

#[cfg(test)]
mod tests;
