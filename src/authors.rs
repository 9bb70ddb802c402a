//! # Authors Module
//!
//! Extracts the set of distinct authors from `git blame --porcelain` output.

use std::collections::BTreeSet;

/// Porcelain header that names the author of a blamed chunk.
const AUTHOR_HEADER: &str = "author ";

/// Name git reports for lines that have not been committed yet.
pub const NOT_COMMITTED_YET: &str = "Not Committed Yet";

/// Distinct author names ordered by surname.
///
/// The surname is approximated by the last whitespace-delimited token of the
/// name. Names comparing equal on surname are ordered by the full name, so the
/// order only depends on the set of names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorList {
  names: Vec<String>,
}

impl AuthorList {
  /// Builds an author list from raw blame output.
  ///
  /// Only `author <name>` header lines contribute; the related
  /// `author-mail`, `author-time` and `author-tz` headers and the
  /// tab-prefixed content lines are ignored.
  pub fn from_blame_output<I, C>(chunks: I) -> Self
  where
    I: IntoIterator<Item = C>,
    C: AsRef<[u8]>,
  {
    let mut names = Vec::new();
    for chunk in chunks {
      let text = String::from_utf8_lossy(chunk.as_ref());
      for line in text.lines() {
        if let Some(name) = line.strip_prefix(AUTHOR_HEADER) {
          let name = name.trim();
          if !name.is_empty() && name != NOT_COMMITTED_YET {
            names.push(name.to_string());
          }
        }
      }
    }
    Self::from_names(names)
  }

  /// Builds an author list from arbitrary names, deduplicating on exact
  /// equality.
  pub fn from_names<I, S>(names: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let unique: BTreeSet<String> = names.into_iter().map(Into::into).collect();
    let mut names: Vec<String> = unique.into_iter().collect();
    // BTreeSet already yields full-name order, so a stable sort on the surname
    // keeps full-name order for ties.
    names.sort_by(|a, b| surname(a).cmp(surname(b)));
    Self { names }
  }

  /// Removes every name contained in `ignored` (exact match).
  pub fn without(mut self, ignored: &[String]) -> Self {
    if !ignored.is_empty() {
      self.names.retain(|name| !ignored.contains(name));
    }
    self
  }

  pub fn is_empty(&self) -> bool {
    self.names.is_empty()
  }

  pub fn len(&self) -> usize {
    self.names.len()
  }

  pub fn as_slice(&self) -> &[String] {
    &self.names
  }
}

impl<'a> IntoIterator for &'a AuthorList {
  type Item = &'a String;
  type IntoIter = std::slice::Iter<'a, String>;

  fn into_iter(self) -> Self::IntoIter {
    self.names.iter()
  }
}

fn surname(name: &str) -> &str {
  name.split_whitespace().next_back().unwrap_or(name)
}

#[cfg(test)]
mod tests {
  use super::*;

  const PORCELAIN: &str = "\
4f1c2a9e0b7d3c5a6e8f9d0a1b2c3d4e5f6a7b8c 1 1 2
author Jane Doe
author-mail <jane@example.com>
author-time 1700000000
author-tz +0100
committer Jane Doe
summary Initial commit
filename Foo.java
\tpublic class Foo {
9a8b7c6d5e4f3a2b1c0d9e8f7a6b5c4d3e2f1a0b 2 2 1
author Adam Zeta
author-mail <adam@example.com>
filename Foo.java
\t  // author of this line
4f1c2a9e0b7d3c5a6e8f9d0a1b2c3d4e5f6a7b8c 3 3
\t}
";

  #[test]
  fn test_parses_only_author_headers() {
    let authors = AuthorList::from_blame_output([PORCELAIN.as_bytes()]);
    assert_eq!(authors.as_slice(), ["Jane Doe", "Adam Zeta"]);
  }

  #[test]
  fn test_deduplicates_across_chunks() {
    let first = "author Ada Lovelace\nauthor Grace Hopper\n";
    let second = "author Ada Lovelace\nauthor Ada Lovelace\n";
    let authors = AuthorList::from_blame_output([first.as_bytes(), second.as_bytes()]);
    assert_eq!(authors.as_slice(), ["Grace Hopper", "Ada Lovelace"]);
  }

  #[test]
  fn test_sorts_by_surname() {
    let authors = AuthorList::from_names(["Adam Zeta", "Jane Doe"]);
    assert_eq!(authors.as_slice(), ["Jane Doe", "Adam Zeta"]);
  }

  #[test]
  fn test_surname_ties_use_full_name() {
    let authors = AuthorList::from_names(["John Smith", "Anna Smith", "Prince"]);
    assert_eq!(authors.as_slice(), ["Prince", "Anna Smith", "John Smith"]);
  }

  #[test]
  fn test_names_are_compared_exactly() {
    let authors = AuthorList::from_names(["jane doe", "Jane Doe"]);
    assert_eq!(authors.len(), 2);
  }

  #[test]
  fn test_skips_uncommitted_pseudo_author() {
    let output = "author Not Committed Yet\nauthor Jane Doe\n";
    let authors = AuthorList::from_blame_output([output]);
    assert_eq!(authors.as_slice(), ["Jane Doe"]);
  }

  #[test]
  fn test_empty_output_yields_empty_list() {
    let authors = AuthorList::from_blame_output([b"".as_slice()]);
    assert!(authors.is_empty());
  }

  #[test]
  fn test_without_removes_exact_names() {
    let authors = AuthorList::from_names(["Jane Doe", "dependabot[bot]"]).without(&["dependabot[bot]".to_string()]);
    assert_eq!(authors.as_slice(), ["Jane Doe"]);
  }
}
