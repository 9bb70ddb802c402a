//! # Workspace Module
//!
//! Classifies a scanned directory by whether git history is available for
//! it.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::git;

/// Workspace root selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Workspace {
  /// Directory inside a git work tree rooted at `root`.
  Git { root: PathBuf },
  /// Directory without git history.
  Directory { root: PathBuf },
}

impl Workspace {
  /// Resolves the workspace containing `dir`.
  pub fn resolve(dir: &Path) -> Result<Self> {
    match git::discover_repo_root(dir)? {
      Some(root) => Ok(Self::Git { root }),
      None => Ok(Self::Directory {
        root: dir.to_path_buf(),
      }),
    }
  }

  pub fn root(&self) -> &Path {
    match self {
      Self::Git { root } | Self::Directory { root } => root.as_path(),
    }
  }

  pub const fn is_git(&self) -> bool {
    matches!(self, Self::Git { .. })
  }
}
