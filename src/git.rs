//! # Git Module
//!
//! This module contains functionality for interacting with git: locating the
//! enclosing repository of a directory and running `git blame` to obtain the
//! attribution metadata of a single file.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use anyhow::Result;
use git2::Repository;
use tokio::process::Command;
use tracing::{debug, trace};

use crate::error::AuthorError;

/// Default upper bound for a single `git blame` invocation.
pub const DEFAULT_BLAME_TIMEOUT: Duration = Duration::from_secs(60);

/// Raw output of one attribution query.
#[derive(Debug, Default, Clone)]
pub struct BlameOutput {
  pub stdout: Vec<u8>,
}

/// Source of attribution metadata for a file.
///
/// Implementations return the raw porcelain text; parsing happens in
/// [`crate::authors::AuthorList::from_blame_output`].
pub trait AttributionSource {
  fn blame(&self, path: &Path) -> impl Future<Output = Result<BlameOutput>> + Send;
}

/// Runs `git blame --porcelain` as a child process.
#[derive(Debug, Clone)]
pub struct GitBlame {
  timeout: Duration,
}

impl GitBlame {
  pub const fn new(timeout: Duration) -> Self {
    Self { timeout }
  }
}

impl Default for GitBlame {
  fn default() -> Self {
    Self::new(DEFAULT_BLAME_TIMEOUT)
  }
}

impl AttributionSource for GitBlame {
  async fn blame(&self, path: &Path) -> Result<BlameOutput> {
    let (dir, file_name) = split_for_blame(path);
    trace!("Running git blame for {} in {}", file_name.display(), dir.display());

    let child = Command::new("git")
      .arg("blame")
      .arg("--porcelain")
      .arg("--")
      .arg(&file_name)
      .current_dir(&dir)
      .stdin(Stdio::null())
      .stdout(Stdio::piped())
      .stderr(Stdio::piped())
      .kill_on_drop(true)
      .spawn()
      .map_err(|source| AuthorError::ExternalCommand {
        path: path.to_path_buf(),
        source,
      })?;

    // Dropping the future on timeout drops the child, which kills it.
    let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
      Ok(result) => result.map_err(|source| AuthorError::ExternalCommand {
        path: path.to_path_buf(),
        source,
      })?,
      Err(_elapsed) => {
        return Err(
          AuthorError::BlameTimeout {
            path: path.to_path_buf(),
            timeout: self.timeout,
          }
          .into(),
        );
      }
    };

    if !output.status.success() {
      // Untracked files and paths outside a repository end up here.
      debug!(
        "git blame exited with {} for {}: {}",
        output.status,
        path.display(),
        String::from_utf8_lossy(&output.stderr).trim()
      );
      return Ok(BlameOutput::default());
    }

    Ok(BlameOutput { stdout: output.stdout })
  }
}

fn split_for_blame(path: &Path) -> (PathBuf, PathBuf) {
  let dir = match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
    _ => PathBuf::from("."),
  };
  let file_name = path.file_name().map_or_else(|| path.to_path_buf(), PathBuf::from);
  (dir, file_name)
}

/// Finds the root of the git work tree containing `dir`, if any.
pub fn discover_repo_root(dir: &Path) -> Result<Option<PathBuf>> {
  match Repository::discover(dir) {
    Ok(repo) => Ok(repo.workdir().map(Path::to_path_buf)),
    Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
    Err(e) => Err(anyhow::Error::new(e).context(format!("Failed to open git repository for {}", dir.display()))),
  }
}
