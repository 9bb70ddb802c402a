//! # Handlers Module
//!
//! Language-specific knowledge lives behind the [`LanguageHandler`] trait:
//! which files belong to the language, where an author list goes in such a
//! file, and how the file text is rewritten to carry it.
//!
//! - [`java`] - Javadoc `@author` blocks for `.java` files
//! - [`registry`] - Static table mapping language identifiers to handlers

pub mod java;
pub mod registry;

use std::path::Path;

pub use java::JavaHandler;
pub use registry::{HandlerEntry, REGISTRY, resolve, supported_languages};

use crate::authors::AuthorList;

/// Where the author lines of a file are spliced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertionPoint {
  /// Index of the line the new lines are written in front of.
  pub line: usize,
  /// Number of leading spaces in front of each author line.
  pub indent: usize,
  /// `true` when no documentation block exists and one must be synthesized.
  pub generate: bool,
  /// First line of the existing block, `None` when synthesizing.
  pub block_start: Option<usize>,
}

/// Options shared by every handler, taken from configuration.
#[derive(Debug, Clone)]
pub struct HandlerOptions {
  /// Word written before the type name in a synthesized summary line.
  pub summary_prefix: String,
}

impl Default for HandlerOptions {
  fn default() -> Self {
    Self {
      summary_prefix: "Class".to_string(),
    }
  }
}

/// Per-language behaviour of the author rewrite.
pub trait LanguageHandler: Send + Sync {
  /// Identifier used on the command line.
  fn language(&self) -> &'static str;

  /// File extension (without the dot) of files this handler processes.
  fn extension(&self) -> &'static str;

  /// Whether this handler claims the language identifier.
  fn supports(&self, language: &str) -> bool {
    language == self.language()
  }

  /// Finds the insertion point in a file given as lines without terminators.
  ///
  /// Returns `None` when the file has nothing to attach authors to.
  fn locate(&self, lines: &[&str]) -> Option<InsertionPoint>;

  /// Rewrites `content` so that it lists exactly `authors`.
  ///
  /// Returns `None` when the file must stay untouched: there are no authors,
  /// or there is no place to put them.
  fn rewrite(&self, content: &str, file_name: Option<&Path>, authors: &AuthorList) -> Option<String>;
}
