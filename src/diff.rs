//! # Diff Module
//!
//! Renders the difference between a file and its rewritten text. Used by
//! `--show-diff` to preview author changes.

use std::fmt::Write as _;
use std::path::Path;

use owo_colors::{OwoColorize, Stream};
use similar::{ChangeTag, TextDiff};

/// Manages diff rendering for author block changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffManager {
  /// Whether to print diffs to stderr
  pub show_diff: bool,
}

impl DiffManager {
  pub const fn new(show_diff: bool) -> Self {
    Self { show_diff }
  }

  /// Builds the diff text for one file: a header line followed by every line
  /// of both versions prefixed with `-`, `+` or a space.
  pub fn render(path: &Path, original: &str, new: &str) -> String {
    let diff = TextDiff::from_lines(original, new);

    let mut diff_content = String::new();
    let _ = writeln!(diff_content, "Diff for {}:", path.display());

    for change in diff.iter_all_changes() {
      let sign = match change.tag() {
        ChangeTag::Delete => "-",
        ChangeTag::Insert => "+",
        ChangeTag::Equal => " ",
      };
      let _ = write!(diff_content, "{}{}", sign, change);
      if change.missing_newline() {
        diff_content.push('\n');
      }
    }

    diff_content
  }

  /// Prints the diff to stderr when enabled, colouring changed lines.
  pub fn display_diff(&self, path: &Path, original: &str, new: &str) {
    if !self.show_diff {
      return;
    }

    for line in Self::render(path, original, new).lines() {
      if line.starts_with('+') {
        eprintln!("{}", line.if_supports_color(Stream::Stderr, |l| l.green()));
      } else if line.starts_with('-') {
        eprintln!("{}", line.if_supports_color(Stream::Stderr, |l| l.red()));
      } else {
        eprintln!("{}", line);
      }
    }
    eprintln!();
  }
}
