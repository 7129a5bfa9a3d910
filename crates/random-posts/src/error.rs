//! Error types of the generate and cleanup workflows.

use std::fmt::{self, Display};

use ecow::EcoString;
use lorem_html::HtmlWriteError;

use crate::model::{PostId, TermId};

/// Errors reported by a content store for a single operation.
///
/// Workflows treat these as per-item failures: they are logged as warnings
/// and the batch continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The post type is not registered.
    UnknownPostType(EcoString),
    /// The taxonomy is not registered.
    UnknownTaxonomy(EcoString),
    /// A term with the same name or slug already exists in the taxonomy.
    TermExists {
        /// The rejected name.
        name: EcoString,
        /// The taxonomy holding the existing term.
        taxonomy: EcoString,
    },
    /// A term or post was given an empty name.
    EmptyName,
    /// No post has this id.
    PostNotFound(PostId),
    /// No term has this id.
    TermNotFound(TermId),
    /// The store refused the operation for another reason.
    Rejected(EcoString),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::UnknownPostType(post_type) => {
                write!(f, "the `{post_type}` post type is not registered")
            }
            StoreError::UnknownTaxonomy(taxonomy) => {
                write!(f, "the `{taxonomy}` taxonomy is not registered")
            }
            StoreError::TermExists { name, taxonomy } => {
                write!(f, "a term named `{name}` already exists in `{taxonomy}`")
            }
            StoreError::EmptyName => f.write_str("the name cannot be empty"),
            StoreError::PostNotFound(id) => write!(f, "post #{id} does not exist"),
            StoreError::TermNotFound(id) => write!(f, "term #{id} does not exist"),
            StoreError::Rejected(reason) => write!(f, "rejected: {reason}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Result type alias for content store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that stop a whole workflow.
#[derive(Debug)]
pub enum Error {
    /// The post type does not exist.
    UnknownPostType(EcoString),
    /// The author could not be resolved to a user.
    UnknownAuthor(EcoString),
    /// The image size is not two positive integers separated by a comma.
    InvalidImageSize(EcoString),
    /// The user declined a confirmation prompt.
    Aborted(EcoString),
    /// Writing generated markup failed.
    Html(HtmlWriteError),
    /// A store operation failed outside of a per-item loop.
    Store(StoreError),
    /// A config or store file could not be parsed.
    Parse {
        /// The file or input being parsed.
        source_name: EcoString,
        /// The parser's message.
        message: EcoString,
    },
    /// An I/O error.
    Io(std::io::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownPostType(post_type) => write!(
                f,
                "The {post_type} post type does not exist, make sure it is registered properly."
            ),
            Error::UnknownAuthor(author) => write!(
                f,
                "There was an error getting the author for {author}, verify they exist."
            ),
            Error::InvalidImageSize(size) => write!(
                f,
                "Invalid image size `{size}`. Ensure you're using a comma delimited string like 1024,768."
            ),
            Error::Aborted(question) => write!(f, "Aborted at: {question}"),
            Error::Html(err) => write!(f, "HTML error: {err}"),
            Error::Store(err) => write!(f, "store error: {err}"),
            Error::Parse {
                source_name,
                message,
            } => write!(f, "failed to parse {source_name}: {message}"),
            Error::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Html(err) => Some(err),
            Error::Store(err) => Some(err),
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<HtmlWriteError> for Error {
    fn from(err: HtmlWriteError) -> Self {
        Error::Html(err)
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Error::Store(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

/// Result type alias for workflow operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
