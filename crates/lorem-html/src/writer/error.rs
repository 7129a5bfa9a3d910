use std::fmt;

use ecow::EcoString;

/// Failure to write the document tree as HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlWriteError {
    /// A tag name outside `[A-Za-z0-9_:-]`, in strict mode.
    UnsafeTag(EcoString),
    /// An attribute name outside `[A-Za-z0-9_:.-]`, in strict mode.
    UnsafeAttribute(EcoString),
    /// A call that needs an open start tag came without one.
    NoOpenTag(&'static str),
}

impl fmt::Display for HtmlWriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HtmlWriteError::UnsafeTag(tag) => write!(f, "unsafe tag name `{tag}`"),
            HtmlWriteError::UnsafeAttribute(name) => write!(f, "unsafe attribute name `{name}`"),
            HtmlWriteError::NoOpenTag(call) => write!(f, "`{call}` called with no open tag"),
        }
    }
}

impl std::error::Error for HtmlWriteError {}

/// Result of the writer's operations.
pub type HtmlWriteResult<T> = Result<T, HtmlWriteError>;
