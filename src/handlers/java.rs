//! # Java Handler
//!
//! Maintains `@author` tags in the Javadoc block of the primary type
//! declaration of a `.java` file.
//!
//! The primary type declaration is the first line outside comments that
//! contains a type keyword followed by a name, an opening brace and no
//! closing brace. Authors go into the Javadoc block directly above it (only
//! blank lines and annotations, whose arguments may span several lines, may
//! sit between the two). Comment markers inside string literals are not
//! comments. Without such a block
//! a new one is synthesized above the declaration, or above its first
//! annotation. Files without a declaration fall back to their first Javadoc
//! block, which covers `package-info.java`.
//!
//! Every existing `@author` line is dropped while the file is rewritten, so
//! running the rewrite again with the same authors yields the same text.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use super::{HandlerOptions, InsertionPoint, LanguageHandler};
use crate::authors::AuthorList;

pub const LANGUAGE: &str = "java";
pub const EXTENSION: &str = "java";

const AUTHOR_TAG: &str = "@author";
const DOC_OPEN: &str = "/**";
const BLOCK_OPEN: &str = "/*";
const BLOCK_CLOSE: &str = "*/";

static TYPE_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"\b(?:class|interface|enum|record)\s+[A-Za-z_$]").expect("type declaration regex must compile")
});

/// Handler for Java sources.
#[derive(Debug, Clone, Default)]
pub struct JavaHandler {
  options: HandlerOptions,
}

impl JavaHandler {
  pub const fn new(options: HandlerOptions) -> Self {
    Self { options }
  }

  pub fn supports_language(language: &str) -> bool {
    language == LANGUAGE
  }
}

impl LanguageHandler for JavaHandler {
  fn language(&self) -> &'static str {
    LANGUAGE
  }

  fn extension(&self) -> &'static str {
    EXTENSION
  }

  fn locate(&self, lines: &[&str]) -> Option<InsertionPoint> {
    let scan = scan(lines);

    let Some(declaration) = scan.declaration else {
      return scan.first_doc_block.map(|block| splice_point(lines, block));
    };

    let line = annotation_start(lines, declaration);

    if let Some(block) = scan.last_doc_block
      && block.close < line
      && lines[block.close + 1..line].iter().all(|between| between.trim().is_empty())
    {
      return Some(splice_point(lines, block));
    }

    Some(InsertionPoint {
      line,
      indent: leading_spaces(lines[declaration]) + 1,
      generate: true,
      block_start: None,
    })
  }

  fn rewrite(&self, content: &str, file_name: Option<&Path>, authors: &AuthorList) -> Option<String> {
    if authors.is_empty() {
      return None;
    }

    let raw: Vec<&str> = content.split_inclusive('\n').collect();
    let lines: Vec<&str> = raw.iter().map(|line| line.trim_end_matches(['\n', '\r'])).collect();
    let point = self.locate(&lines)?;
    trace!("Insertion point: {:?}", point);

    let eol = if content.contains("\r\n") { "\r\n" } else { "\n" };
    let mut out = String::with_capacity(content.len() + (authors.len() + 4) * 32);

    for (index, line) in raw.iter().enumerate() {
      if index == point.line {
        if point.generate {
          self.write_new_block(&mut out, &point, file_name, authors, eol);
        } else {
          write_into_block(&mut out, &lines, line, &point, authors, eol);
          continue;
        }
      }
      if is_authorship_line(lines[index]) {
        if let Some(remainder) = authorship_remainder(lines[index]) {
          out.push_str(&remainder);
          out.push_str(&line[lines[index].len()..]);
        }
        continue;
      }
      out.push_str(line);
    }

    Some(out)
  }
}

impl JavaHandler {
  fn write_new_block(
    &self,
    out: &mut String,
    point: &InsertionPoint,
    file_name: Option<&Path>,
    authors: &AuthorList,
    eol: &str,
  ) {
    let pad = " ".repeat(point.indent);
    out.push_str(&" ".repeat(point.indent.saturating_sub(1)));
    out.push_str(DOC_OPEN);
    out.push_str(eol);

    if let Some(type_name) = file_name.and_then(Path::file_stem).and_then(|stem| stem.to_str()) {
      out.push_str(&format!("{pad}* {} {type_name}{eol}", self.options.summary_prefix));
    }

    write_authors(out, &pad, authors, eol);

    out.push_str(&pad);
    out.push_str(BLOCK_CLOSE);
    out.push_str(eol);
  }
}

/// Writes the author lines in front of the closing line of an existing block,
/// then the closing line itself.
fn write_into_block(
  out: &mut String,
  lines: &[&str],
  raw_close: &str,
  point: &InsertionPoint,
  authors: &AuthorList,
  eol: &str,
) {
  let start = point.block_start.unwrap_or(point.line);
  let close = lines[point.line];
  let ending = &raw_close[close.len()..];
  let pad = " ".repeat(point.indent);

  // Text sharing the line with the closing marker is moved onto its own line.
  let search_from = if start == point.line {
    close.find(DOC_OPEN).map_or(0, |pos| pos + DOC_OPEN.len())
  } else {
    0
  };
  let marker = close[search_from..]
    .find(BLOCK_CLOSE)
    .map_or(0, |pos| pos + search_from);
  let head = close[..marker].trim_end();
  let has_head = !head.trim().is_empty();

  let mut has_authors = lines[start..point.line].iter().any(|line| is_authorship_line(line));
  let mut last_content = lines[start..point.line]
    .iter()
    .rev()
    .find(|line| !is_authorship_line(line))
    .copied();

  if has_head {
    if is_authorship_line(head) {
      has_authors = true;
      if let Some(opener) = doc_opener(head) {
        out.push_str(opener);
        out.push_str(eol);
      }
    } else {
      out.push_str(head);
      out.push_str(eol);
      last_content = Some(head);
    }
  }

  if !has_authors && last_content.is_some_and(|line| !is_trivial_doc_line(line)) {
    out.push_str(&pad);
    out.push('*');
    out.push_str(eol);
  }

  write_authors(out, &pad, authors, eol);

  if has_head {
    out.push_str(&pad);
    out.push_str(&close[marker..]);
    out.push_str(ending);
  } else {
    out.push_str(raw_close);
  }
}

fn write_authors(out: &mut String, pad: &str, authors: &AuthorList, eol: &str) {
  for author in authors {
    out.push_str(&format!("{pad}* {AUTHOR_TAG} {author}{eol}"));
  }
}

#[derive(Debug, Clone, Copy)]
struct DocBlock {
  start: usize,
  close: usize,
}

#[derive(Debug, Default)]
struct Scan {
  declaration: Option<usize>,
  first_doc_block: Option<DocBlock>,
  last_doc_block: Option<DocBlock>,
}

impl Scan {
  fn record(&mut self, block: DocBlock) {
    self.first_doc_block.get_or_insert(block);
    self.last_doc_block = Some(block);
  }
}

/// Single top-down pass recording Javadoc blocks until the primary type
/// declaration is found.
fn scan(lines: &[&str]) -> Scan {
  let mut result = Scan::default();
  let mut open_block: Option<(usize, bool)> = None;

  for (index, line) in lines.iter().enumerate() {
    let mut rest: &str = line;

    if let Some((start, is_doc)) = open_block {
      let Some(pos) = rest.find(BLOCK_CLOSE) else {
        continue;
      };
      open_block = None;
      if is_doc {
        result.record(DocBlock { start, close: index });
      }
      rest = &rest[pos + BLOCK_CLOSE.len()..];
    }

    // Code outside comments and string literals, comments replaced by a space.
    let mut code = String::new();
    loop {
      match find_comment_start(rest) {
        None => {
          code.push_str(rest);
          break;
        }
        Some(CommentStart::Line(pos)) => {
          code.push_str(&rest[..pos]);
          break;
        }
        Some(CommentStart::Block(pos)) => {
          code.push_str(&rest[..pos]);
          code.push(' ');
          let comment = &rest[pos..];
          let is_doc = comment.starts_with(DOC_OPEN) && !comment.starts_with("/**/");
          match comment[BLOCK_OPEN.len()..].find(BLOCK_CLOSE) {
            Some(close) => {
              if is_doc {
                result.record(DocBlock {
                  start: index,
                  close: index,
                });
              }
              rest = &comment[BLOCK_OPEN.len() + close + BLOCK_CLOSE.len()..];
            }
            None => {
              open_block = Some((index, is_doc));
              break;
            }
          }
        }
      }
    }

    if is_type_declaration(&code) {
      result.declaration = Some(index);
      break;
    }
  }

  result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommentStart {
  Line(usize),
  Block(usize),
}

/// Byte offset of the first `//` or `/*` that is not inside a string or
/// character literal.
fn find_comment_start(code: &str) -> Option<CommentStart> {
  let bytes = code.as_bytes();
  let mut quote: Option<u8> = None;
  let mut index = 0;
  while index < bytes.len() {
    let byte = bytes[index];
    match quote {
      Some(_) if byte == b'\\' => index += 1,
      Some(open) if byte == open => quote = None,
      Some(_) => {}
      None => match (byte, bytes.get(index + 1)) {
        (b'"' | b'\'', _) => quote = Some(byte),
        (b'/', Some(b'/')) => return Some(CommentStart::Line(index)),
        (b'/', Some(b'*')) => return Some(CommentStart::Block(index)),
        _ => {}
      },
    }
    index += 1;
  }
  None
}

/// Opening minus closing parentheses and braces outside string literals.
fn bracket_balance(line: &str) -> i32 {
  let mut balance = 0;
  let mut quote: Option<char> = None;
  let mut escaped = false;
  for ch in line.chars() {
    match quote {
      Some(_) if escaped => escaped = false,
      Some(_) if ch == '\\' => escaped = true,
      Some(open) if ch == open => quote = None,
      Some(_) => {}
      None => match ch {
        '"' | '\'' => quote = Some(ch),
        '(' | '{' => balance += 1,
        ')' | '}' => balance -= 1,
        _ => {}
      },
    }
  }
  balance
}

/// First line of the annotations directly above `declaration`, or the
/// declaration itself. Annotation arguments may span several lines.
fn annotation_start(lines: &[&str], declaration: usize) -> usize {
  let mut start = declaration;
  let mut depth = 0;
  for index in (0..declaration).rev() {
    let line = lines[index];
    if depth == 0 && line.trim().is_empty() {
      continue;
    }
    depth -= bracket_balance(line);
    if depth > 0 {
      continue;
    }
    if depth < 0 || !is_annotation_line(line) {
      break;
    }
    start = index;
  }
  start
}

fn splice_point(lines: &[&str], block: DocBlock) -> InsertionPoint {
  let close = lines[block.close];
  let opens_here = close.trim_start().starts_with(BLOCK_OPEN);
  InsertionPoint {
    line: block.close,
    indent: leading_spaces(close) + usize::from(opens_here),
    generate: false,
    block_start: Some(block.start),
  }
}

fn is_type_declaration(code: &str) -> bool {
  code.contains('{') && !code.contains('}') && TYPE_DECLARATION.is_match(code)
}

/// A Javadoc `@author` tag line, optionally after a leading `*` or `/**`.
fn is_authorship_line(line: &str) -> bool {
  let trimmed = line.trim_start();
  let body = trimmed
    .strip_prefix(DOC_OPEN)
    .or_else(|| trimmed.strip_prefix('*'))
    .unwrap_or(trimmed)
    .trim_start();
  body.starts_with(AUTHOR_TAG)
}

/// What stays of an authorship line once its tag is removed: the block
/// opener or closer sharing the line, if any.
fn authorship_remainder(line: &str) -> Option<String> {
  let trimmed = line.trim();
  let indent = &line[..line.len() - line.trim_start().len()];
  match (doc_opener(line), trimmed.ends_with(BLOCK_CLOSE)) {
    (Some(opener), true) => Some(format!("{opener} {BLOCK_CLOSE}")),
    (Some(opener), false) => Some(opener.to_string()),
    (None, true) => Some(format!("{indent}{BLOCK_CLOSE}")),
    (None, false) => None,
  }
}

/// The leading whitespace and `/**` of a line opening a Javadoc block.
fn doc_opener(line: &str) -> Option<&str> {
  let indent = line.len() - line.trim_start().len();
  line[indent..].starts_with(DOC_OPEN).then(|| &line[..indent + DOC_OPEN.len()])
}

fn is_annotation_line(line: &str) -> bool {
  line.trim_start().starts_with('@') && !is_authorship_line(line)
}

/// A block line carrying no text, such as ` *` or `/**`.
fn is_trivial_doc_line(line: &str) -> bool {
  let trimmed = line.trim();
  let body = trimmed
    .strip_prefix(DOC_OPEN)
    .or_else(|| trimmed.strip_prefix('*'))
    .unwrap_or(trimmed);
  body.trim().is_empty()
}

fn leading_spaces(line: &str) -> usize {
  line.len() - line.trim_start_matches(' ').len()
}
