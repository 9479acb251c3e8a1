//! wrapgen - C library metadata to a language-neutral API model
//!
//! This crate provides the core library functionality for wrapgen: the
//! identifier algebra, the abstract API tree, the translator from C
//! metadata, and the contract language backends implement.

pub mod core;
pub mod cparser;
pub mod translator;
pub mod util;

/// Test utilities for wrapgen unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides C project fixtures.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{Api, Name, NameKind, NodeId, Result, TranslateError, Type};
pub use crate::cparser::{CParser, CProject, Translation};
pub use crate::translator::{Outline, Translatable, Translator};
pub use crate::util::config::Config;
