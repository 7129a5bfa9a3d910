//! Elements the writer textualized instead of emitting as markup.
//!
//! In lenient mode an element with an unsafe tag or attribute name is written
//! as escaped text. Each such element is reported to a [`DiagnosticSink`] and
//! to `log`.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use ecow::EcoString;

/// The name that made an element unsafe to emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The tag name.
    UnsafeTag(EcoString),
    /// An attribute name of the element.
    UnsafeAttribute {
        /// Tag of the element.
        tag: EcoString,
        /// The offending attribute.
        name: EcoString,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnsafeTag(tag) => {
                write!(f, "textualized <{tag}>: the tag name is not safe")
            }
            Diagnostic::UnsafeAttribute { tag, name } => {
                write!(f, "textualized <{tag}>: the attribute name '{name}' is not safe")
            }
        }
    }
}

/// Receives textualized elements.
pub trait DiagnosticSink {
    /// Records one element.
    fn emit(&mut self, diagnostic: Diagnostic);
}

/// Drops everything. The default sink of a writer.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&mut self, _: Diagnostic) {}
}

/// Collects into a vector that the caller keeps a handle to.
impl DiagnosticSink for Rc<RefCell<Vec<Diagnostic>>> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.borrow_mut().push(diagnostic);
    }
}
