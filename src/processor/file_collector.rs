//! # File Collector Module
//!
//! Finds the source files of one language below a directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, trace, warn};

/// File collector for a single file extension.
pub struct FileCollector {
  /// Extension without the leading dot
  extension: String,
  /// Patterns matched against paths relative to the scanned directory
  ignore: Vec<glob::Pattern>,
}

impl FileCollector {
  /// Creates a collector for `extension`, skipping files matching any of
  /// `ignore_patterns`.
  ///
  /// # Errors
  ///
  /// Returns an error if an ignore pattern is not a valid glob.
  pub fn new(extension: &str, ignore_patterns: &[String]) -> Result<Self> {
    let ignore = ignore_patterns
      .iter()
      .map(|pattern| glob::Pattern::new(pattern).with_context(|| format!("Invalid ignore pattern: {}", pattern)))
      .collect::<Result<Vec<_>>>()?;

    Ok(Self {
      extension: extension.to_string(),
      ignore,
    })
  }

  /// Collects every file below `dir`, at any depth, ending in the extension.
  ///
  /// The result is sorted so runs visit files in a stable order.
  pub fn collect(&self, dir: &Path) -> Result<Vec<PathBuf>> {
    let dir_str = dir
      .to_str()
      .with_context(|| format!("Directory path is not valid UTF-8: {}", dir.display()))?;
    let pattern = format!(
      "{}/**/*.{}",
      glob::Pattern::escape(dir_str.trim_end_matches(['/', '\\'])),
      self.extension
    );
    debug!("Collecting files matching {}", pattern);

    let entries = glob::glob(&pattern).with_context(|| format!("Invalid glob pattern: {}", pattern))?;

    let mut files = Vec::new();
    for entry in entries {
      match entry {
        Ok(path) if path.is_file() => {
          if self.is_ignored(&path, dir) {
            trace!("Skipping: {} (ignored)", path.display());
          } else {
            files.push(path);
          }
        }
        Ok(_) => {}
        Err(e) => warn!("Error with glob pattern: {}", e),
      }
    }

    files.sort();
    debug!("Found {} .{} files in {}", files.len(), self.extension, dir.display());
    Ok(files)
  }

  fn is_ignored(&self, path: &Path, root: &Path) -> bool {
    if self.ignore.is_empty() {
      return false;
    }
    let relative = path.strip_prefix(root).unwrap_or(path);
    let relative = relative.to_string_lossy().replace('\\', "/");
    self.ignore.iter().any(|pattern| pattern.matches(&relative))
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use super::*;

  fn touch(path: &Path) {
    fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
    fs::write(path, "class A {\n}\n").expect("write file");
  }

  #[test]
  fn test_collects_nested_files_with_extension() {
    let dir = tempfile::tempdir().expect("create temp dir");
    touch(&dir.path().join("Top.java"));
    touch(&dir.path().join("a/b/c/Deep.java"));
    touch(&dir.path().join("a/readme.md"));
    touch(&dir.path().join("a/Script.javascript"));

    let collector = FileCollector::new("java", &[]).unwrap();
    let files = collector.collect(dir.path()).unwrap();

    let names: Vec<_> = files
      .iter()
      .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
      .collect();
    assert_eq!(names, vec!["Top.java", "a/b/c/Deep.java"]);
  }

  #[test]
  fn test_ignore_patterns_are_relative_to_root() {
    let dir = tempfile::tempdir().expect("create temp dir");
    touch(&dir.path().join("src/Keep.java"));
    touch(&dir.path().join("generated/Skip.java"));

    let collector = FileCollector::new("java", &["generated/**".to_string()]).unwrap();
    let files = collector.collect(dir.path()).unwrap();

    assert_eq!(files, vec![dir.path().join("src/Keep.java")]);
  }

  #[test]
  fn test_invalid_ignore_pattern() {
    assert!(FileCollector::new("java", &["[".to_string()]).is_err());
  }

  #[test]
  fn test_directory_names_are_escaped() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let root = dir.path().join("[weird]");
    touch(&root.join("Foo.java"));

    let collector = FileCollector::new("java", &[]).unwrap();
    let files = collector.collect(&root).unwrap();
    assert_eq!(files, vec![root.join("Foo.java")]);
  }
}
