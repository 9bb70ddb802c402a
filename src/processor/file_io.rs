//! # File I/O Module
//!
//! Reading source files and replacing them atomically.

use std::io::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

/// File I/O operations for the processor.
pub struct FileIO;

impl FileIO {
  /// Read full file content.
  pub fn read_full_content(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
  }

  /// Replaces the content of `path` with `content`.
  ///
  /// The new content is written to a temporary file next to `path`, flushed,
  /// and renamed over the original. If any step fails the temporary file is
  /// removed when it goes out of scope and `path` keeps its old content.
  /// The original file's permissions are carried over.
  pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
      Some(parent) if !parent.as_os_str().is_empty() => parent,
      _ => Path::new("."),
    };

    let mut temp =
      NamedTempFile::new_in(dir).with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    temp
      .write_all(content.as_bytes())
      .with_context(|| format!("Failed to write temporary file for {}", path.display()))?;
    temp
      .as_file()
      .sync_all()
      .with_context(|| format!("Failed to flush temporary file for {}", path.display()))?;

    if let Ok(metadata) = std::fs::metadata(path) {
      std::fs::set_permissions(temp.path(), metadata.permissions())
        .with_context(|| format!("Failed to copy permissions of {}", path.display()))?;
    }

    temp
      .persist(path)
      .map_err(|e| e.error)
      .with_context(|| format!("Failed to replace file: {}", path.display()))?;
    Ok(())
  }
}
