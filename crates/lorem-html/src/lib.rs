#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

// AST related exports
pub use crate::ast::{tags, Document, HtmlAttribute, HtmlElement, Node};

// Generator
pub use crate::generator::{HtmlRandomizer, LeafKind, LeafPresets, RandomizerOptions};

// Randomness and filler text
pub use crate::random::RandomSource;
pub use crate::text::{ucfirst, LoremText, TextProvider};

// HTML writer related exports
pub use crate::writer::{
    to_plain_text, HtmlWriteError, HtmlWriteResult, HtmlWriter, HtmlWriterOptions,
};

pub mod ast;
pub mod generator;
pub mod random;
pub mod text;
pub mod writer;
