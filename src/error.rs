//! # Error Module
//!
//! Typed failures that callers may want to match on. Everything else is
//! propagated as [`anyhow::Error`] with context attached.

use std::path::PathBuf;
use std::time::Duration;

/// Failures that abort a run.
#[derive(Debug, thiserror::Error)]
pub enum AuthorError {
  /// A requested language has no registered handler.
  #[error("Language {language} not supported. Select one of the supported languages: {}", supported.join(", "))]
  UnsupportedLanguage { language: String, supported: Vec<&'static str> },

  /// A requested root path is not an existing directory.
  #[error("Not a directory: {}", .0.display())]
  InvalidDirectory(PathBuf),

  /// The attribution command could not be started.
  #[error("Failed to run git blame for {}: {source}", path.display())]
  ExternalCommand { path: PathBuf, source: std::io::Error },

  /// The attribution command did not finish in time.
  #[error("git blame for {} did not finish within {}s", path.display(), timeout.as_secs())]
  BlameTimeout { path: PathBuf, timeout: Duration },
}
