//! Static language registry.
//!
//! Adding a language means adding a [`LanguageHandler`] implementation and an
//! entry to [`REGISTRY`].

use tracing::debug;

use super::{HandlerOptions, JavaHandler, LanguageHandler, java};
use crate::error::AuthorError;

/// One registered language.
pub struct HandlerEntry {
  pub language: &'static str,
  pub supports: fn(&str) -> bool,
  pub build: fn(&HandlerOptions) -> Box<dyn LanguageHandler>,
}

fn build_java(options: &HandlerOptions) -> Box<dyn LanguageHandler> {
  Box::new(JavaHandler::new(options.clone()))
}

pub static REGISTRY: &[HandlerEntry] = &[HandlerEntry {
  language: java::LANGUAGE,
  supports: JavaHandler::supports_language,
  build: build_java,
}];

/// Identifiers of every registered language.
pub fn supported_languages() -> Vec<&'static str> {
  REGISTRY.iter().map(|entry| entry.language).collect()
}

fn find_entry(language: &str) -> Option<&'static HandlerEntry> {
  REGISTRY.iter().find(|entry| (entry.supports)(language))
}

/// Builds one handler per distinct requested language.
///
/// Every language is validated before any handler is built, so an unknown
/// identifier fails the whole request.
///
/// # Errors
///
/// Returns [`AuthorError::UnsupportedLanguage`] for the first identifier no
/// entry claims.
pub fn resolve(languages: &[String], options: &HandlerOptions) -> Result<Vec<Box<dyn LanguageHandler>>, AuthorError> {
  let mut entries: Vec<(&str, &'static HandlerEntry)> = Vec::with_capacity(languages.len());
  for language in languages {
    let entry = find_entry(language).ok_or_else(|| AuthorError::UnsupportedLanguage {
      language: language.clone(),
      supported: supported_languages(),
    })?;
    entries.push((language.as_str(), entry));
  }

  let mut handlers: Vec<Box<dyn LanguageHandler>> = Vec::with_capacity(entries.len());
  for (language, entry) in entries {
    if handlers.iter().any(|handler| handler.supports(language)) {
      continue;
    }
    handlers.push((entry.build)(options));
  }

  debug!("Resolved {} language handler(s)", handlers.len());
  Ok(handlers)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_resolve_java() {
    let handlers = resolve(&["java".to_string()], &HandlerOptions::default()).unwrap();
    assert_eq!(handlers.len(), 1);
    assert_eq!(handlers[0].language(), "java");
    assert_eq!(handlers[0].extension(), "java");
  }

  #[test]
  fn test_resolve_collapses_duplicates() {
    let languages = vec!["java".to_string(), "java".to_string()];
    let handlers = resolve(&languages, &HandlerOptions::default()).unwrap();
    assert_eq!(handlers.len(), 1);
  }

  #[test]
  fn test_resolve_rejects_unknown_language_before_building() {
    let languages = vec!["java".to_string(), "cobol".to_string()];
    let err = resolve(&languages, &HandlerOptions::default()).err().unwrap();
    match err {
      AuthorError::UnsupportedLanguage { language, supported } => {
        assert_eq!(language, "cobol");
        assert_eq!(supported, vec!["java"]);
      }
      other => panic!("unexpected error: {other}"),
    }
  }

  #[test]
  fn test_language_match_is_exact() {
    assert!(find_entry("java").is_some());
    assert!(find_entry("Java").is_none());
    assert!(find_entry("javascript").is_none());
  }
}
