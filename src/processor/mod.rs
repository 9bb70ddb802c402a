//! # Processor Module
//!
//! This module drives the per-file pipeline for one language: collect the
//! language's files below each directory, blame every file, and rewrite its
//! author block.
//!
//! The module is organized into several submodules:
//! - [`file_io`] - File reading and atomic replacement
//! - [`file_collector`] - Recursive file collection and ignore patterns
//!
//! Files are processed one at a time, in sorted order. The first error
//! (failing to run git, failing to write a file) aborts the run; files
//! rewritten before it keep their new content.

mod file_collector;
mod file_io;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
pub use file_collector::FileCollector;
pub use file_io::FileIO;
use tracing::{debug, info, warn};

use crate::authors::AuthorList;
use crate::diff::DiffManager;
use crate::error::AuthorError;
use crate::git::{AttributionSource, GitBlame};
use crate::handlers::LanguageHandler;
use crate::info_log;
use crate::report::{FileAction, FileReport, ProcessingSummary};
use crate::workspace::Workspace;

/// Configuration for creating a Processor instance.
#[derive(Debug, Clone, Default)]
pub struct ProcessorConfig {
  /// Compute rewrites without touching any file
  pub dry_run: bool,
  /// Skip directories that are not inside a git work tree
  pub git_only: bool,
  /// Glob patterns of files to skip, relative to the scanned directory
  pub ignore_patterns: Vec<String>,
  /// Author names never written
  pub ignore_authors: Vec<String>,
  pub diff_manager: DiffManager,
}

/// Runs the author rewrite of one language over directories.
pub struct Processor<S = GitBlame> {
  handler: Box<dyn LanguageHandler>,
  source: S,
  file_collector: FileCollector,
  dry_run: bool,
  git_only: bool,
  ignore_authors: Vec<String>,
  diff_manager: DiffManager,
}

impl<S: AttributionSource> Processor<S> {
  /// Creates a new processor.
  ///
  /// # Errors
  ///
  /// Returns an error if any of the ignore patterns are invalid.
  pub fn new(handler: Box<dyn LanguageHandler>, source: S, config: ProcessorConfig) -> Result<Self> {
    let file_collector = FileCollector::new(handler.extension(), &config.ignore_patterns)?;

    Ok(Self {
      handler,
      source,
      file_collector,
      dry_run: config.dry_run,
      git_only: config.git_only,
      ignore_authors: config.ignore_authors,
      diff_manager: config.diff_manager,
    })
  }

  /// Processes every directory in order.
  ///
  /// # Errors
  ///
  /// Fails on the first directory that is not an existing directory, and on
  /// the first file that cannot be blamed or written.
  pub async fn run(&self, directories: &[PathBuf]) -> Result<ProcessingSummary> {
    info!("Language handler for {} started", self.handler.language());
    debug!("Entered directories {:?}", directories);

    let start_time = Instant::now();
    let mut reports = Vec::new();
    for dir in directories {
      reports.extend(self.run_for_directory(dir).await?);
    }

    Ok(ProcessingSummary::from_reports(&reports, start_time.elapsed()))
  }

  /// Processes every matching file below `dir`.
  ///
  /// # Errors
  ///
  /// Returns [`AuthorError::InvalidDirectory`] before touching any file when
  /// `dir` is not an existing directory.
  pub async fn run_for_directory(&self, dir: &Path) -> Result<Vec<FileReport>> {
    if !dir.is_dir() {
      return Err(AuthorError::InvalidDirectory(dir.to_path_buf()).into());
    }

    if self.git_only {
      let workspace = Workspace::resolve(dir)?;
      if !workspace.is_git() {
        warn!("{} is not inside a git repository, skipping", dir.display());
        return Ok(Vec::new());
      }
      debug!("Using git repository at {}", workspace.root().display());
    }

    let files = self.file_collector.collect(dir)?;
    let mut reports = Vec::with_capacity(files.len());
    for file in files {
      reports.push(self.process_file(&file).await?);
    }
    Ok(reports)
  }

  /// Runs blame, author extraction and the rewrite for a single file.
  pub async fn process_file(&self, path: &Path) -> Result<FileReport> {
    let output = self.source.blame(path).await?;
    let authors = AuthorList::from_blame_output([&output.stdout]).without(&self.ignore_authors);
    debug!("Found authors {:?} for file {}", authors.as_slice(), path.display());

    let report = |action| FileReport {
      path: path.to_path_buf(),
      action,
      authors: authors.len(),
    };

    if authors.is_empty() {
      return Ok(report(FileAction::NoAuthors));
    }

    let content = FileIO::read_full_content(path)?;
    let Some(updated) = self.handler.rewrite(&content, Some(path), &authors) else {
      debug!("No type declaration or documentation block in {}", path.display());
      return Ok(report(FileAction::NoInsertionPoint));
    };

    if updated == content {
      return Ok(report(FileAction::UpToDate));
    }

    self.diff_manager.display_diff(path, &content, &updated);

    if self.dry_run {
      return Ok(report(FileAction::WouldUpdate));
    }

    FileIO::write_atomic(path, &updated).with_context(|| format!("Failed to update authors in {}", path.display()))?;
    info_log!("Updated authors for file {}", path.display());
    Ok(report(FileAction::Updated))
  }
}
