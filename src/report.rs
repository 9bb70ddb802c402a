//! # Report Module
//!
//! Per-file outcomes of a run and the summary printed at the end.

use std::path::PathBuf;
use std::time::Duration;

/// Outcome for one processed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
  /// Path to the file
  pub path: PathBuf,
  /// What happened to the file
  pub action: FileAction,
  /// Number of authors found in the file's history
  pub authors: usize,
}

/// Possible actions taken on a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
  /// The author list was written to the file
  Updated,
  /// The author list differs, but dry-run mode left the file alone
  WouldUpdate,
  /// The file already lists exactly these authors
  UpToDate,
  /// No type declaration or documentation block to attach authors to
  NoInsertionPoint,
  /// History yielded no authors, the file was skipped
  NoAuthors,
}

/// Aggregated counts for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingSummary {
  pub files_scanned: usize,
  pub files_changed: usize,
  pub files_up_to_date: usize,
  pub files_skipped: usize,
  pub processing_time: Duration,
}

impl ProcessingSummary {
  pub fn from_reports(reports: &[FileReport], processing_time: Duration) -> Self {
    let mut summary = Self {
      files_scanned: reports.len(),
      processing_time,
      ..Self::default()
    };
    for report in reports {
      match report.action {
        FileAction::Updated | FileAction::WouldUpdate => summary.files_changed += 1,
        FileAction::UpToDate => summary.files_up_to_date += 1,
        FileAction::NoInsertionPoint | FileAction::NoAuthors => summary.files_skipped += 1,
      }
    }
    summary
  }
}
