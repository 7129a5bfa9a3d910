#![doc = include_str!("../README.md")]

pub mod cleanup;
pub mod config;
pub mod error;
pub mod generate;
pub mod host;
pub mod memory;
pub mod model;
pub mod progress;
pub mod prompt;
pub mod validate;

pub use crate::cleanup::{cleanup, CleanupOptions, CleanupReport};
pub use crate::config::Config;
pub use crate::error::{Error, Result, StoreError, StoreResult};
pub use crate::generate::{generate, ContentKind, ContentOptions, GenerateOptions, GenerateReport};
pub use crate::host::{ContentStore, Host, MediaStore, UserLookup};
pub use crate::memory::MemoryHost;
pub use crate::progress::{LogProgress, NullProgress, Progress};
pub use crate::prompt::{AssumeYes, Confirm, Decline, LineConfirm, StdinConfirm};
