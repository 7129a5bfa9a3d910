//! Document tree for generated HTML.
//!
//! A generated document is a plain owned tree: an `html` root holding a
//! `head` and a `body`, whose children are elements or text leaves. The tree
//! has no back-references and is serialized in insertion order.

mod html;
mod node;

pub use self::html::{tags, HtmlAttribute, HtmlElement};
pub use self::node::{Document, Node};
