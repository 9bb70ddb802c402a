//! # Output Module
//!
//! This module centralizes all user-facing output for docauthor.
//! Diagnostics go through `tracing`; this module only prints the start line
//! and the final summary, honouring `-q` and `-v`.

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::report::ProcessingSummary;

/// Symbols used in output
pub mod symbols {
  /// Authors written
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Authors would change (dry run)
  pub const PENDING: &str = "\u{21bb}"; // ↻
}

/// Print the "Updating authors of <lang> files in N directories..." line.
pub fn print_start_message(language: &str, directory_count: usize, dry_run: bool) {
  if is_quiet() {
    return;
  }

  let verb = if dry_run { "Checking" } else { "Updating" };
  let dirs_word = if directory_count == 1 { "directory" } else { "directories" };
  println!(
    "{} authors of {} files in {} {}...",
    verb, language, directory_count, dirs_word
  );
}

/// Print a blank line for visual separation (respects quiet mode).
pub fn print_blank_line() {
  if !is_quiet() {
    println!();
  }
}

/// Builds the summary line without colours.
pub fn format_summary(summary: &ProcessingSummary, dry_run: bool) -> String {
  let changed_word = if dry_run { "to update" } else { "updated" };
  format!(
    "Summary: {} scanned, {} {}, {} up to date, {} skipped",
    summary.files_scanned, summary.files_changed, changed_word, summary.files_up_to_date, summary.files_skipped
  )
}

/// Print the processing summary.
///
/// In verbose mode, also shows timing.
pub fn print_summary(summary: &ProcessingSummary, dry_run: bool) {
  if is_quiet() {
    return;
  }

  let symbol = if dry_run { symbols::PENDING } else { symbols::SUCCESS };
  let mut summary_line = format!(
    "{} {}",
    symbol.if_supports_color(Stream::Stdout, |s| s.green()),
    format_summary(summary, dry_run)
  );

  if is_verbose() {
    summary_line.push_str(&format!(" ({:.2}s)", summary.processing_time.as_secs_f64()));
  }

  println!("{}", summary_line);
}
